//! Human-readable rendering of API responses

use integration_mapbox::{DirectionsResponse, Feature, FeatureCollection, Route};

/// One line per feature: rank, name, context and coordinates
pub fn format_collection(collection: &FeatureCollection) -> String {
    if collection.is_empty() {
        return "  (no results)".to_string();
    }

    collection
        .features
        .iter()
        .enumerate()
        .map(|(i, feature)| format!("  {}. {}", i + 1, format_feature(feature)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `name - place_formatted [lon, lat]`, skipping missing parts
pub fn format_feature(feature: &Feature) -> String {
    let mut line = feature.name().unwrap_or("(unnamed)").to_string();

    if let Some(context) = feature.place_formatted() {
        line.push_str(" - ");
        line.push_str(context);
    }

    if let Some(point) = feature.point() {
        line.push_str(&format!(
            " [{:.6}, {:.6}]",
            point.longitude(),
            point.latitude()
        ));
    }

    if let Some(confidence) = feature.match_code().and_then(|m| m.confidence) {
        line.push_str(&format!(" (match: {confidence})"));
    }

    line
}

pub fn format_route(index: usize, route: &Route) -> String {
    let mut text = format!(
        "  Route {}: {:.1} km, {} min",
        index + 1,
        route.distance_km(),
        route.duration_minutes()
    );

    for leg in &route.legs {
        if let Some(summary) = leg.summary.as_deref().filter(|s| !s.is_empty()) {
            text.push_str(&format!("\n    via {summary}"));
        }
        for step in &leg.steps {
            text.push_str(&format!("\n    - {}", step.maneuver.instruction));
        }
    }

    text
}

pub fn format_directions(response: &DirectionsResponse) -> String {
    let status = response.status();
    if !status.is_ok() {
        let message = response.message.as_deref().unwrap_or("no details");
        return format!("  No route ({status:?}): {message}");
    }

    response
        .routes
        .iter()
        .enumerate()
        .map(|(i, route)| format_route(i, route))
        .collect::<Vec<_>>()
        .join("\n")
}
