//! Guided tour of the geocoding API
//!
//! Runs one request per feature and prints a short summary. A failing step
//! is reported and the tour continues with the next one.

use integration_mapbox::{
    BatchOptions, BatchQuery, FeatureType, ForwardOptions, GeocodingClient, Location,
    MapboxError, ReverseOptions, StructuredInput,
};

use crate::output::{format_collection, format_feature};

pub async fn run(geocoder: &dyn GeocodingClient) {
    println!("=== Mapbox Geocoding API v6 Examples ===");

    println!("\n1. Basic Forward Geocoding");
    report(basic_forward(geocoder).await);

    println!("\n2. Forward Geocoding with Options");
    report(forward_with_options(geocoder).await);

    println!("\n3. Structured Input Forward Geocoding");
    report(structured_input(geocoder).await);

    println!("\n4. Reverse Geocoding");
    report(reverse(geocoder).await);

    println!("\n5. Permanent Geocoding");
    report(permanent(geocoder).await);

    println!("\n6. Batch Geocoding");
    report(batch(geocoder).await);

    println!("\n7. Using Helper Methods");
    report(helpers(geocoder).await);
}

fn report(result: Result<String, MapboxError>) {
    match result {
        Ok(text) => println!("{text}"),
        Err(e) => println!("❌ Error: {e}"),
    }
}

async fn basic_forward(geocoder: &dyn GeocodingClient) -> Result<String, MapboxError> {
    let result = geocoder
        .forward("2 Lincoln Memorial Circle NW", ForwardOptions::default())
        .await?;
    Ok(result
        .first()
        .map_or_else(|| "  (no results)".to_string(), |f| format!("  Found: {}", format_feature(f))))
}

async fn forward_with_options(geocoder: &dyn GeocodingClient) -> Result<String, MapboxError> {
    let opts = ForwardOptions {
        country: Some("us".to_string()),
        limit: Some(5),
        types: Some(FeatureType::Address.to_string()),
        autocomplete: Some(false),
        language: Some("en".to_string()),
        worldview: Some("us".to_string()),
        ..Default::default()
    };
    let result = geocoder.forward("1600 Pennsylvania Avenue", opts).await?;
    Ok(format!(
        "  Found {} results:\n{}",
        result.len(),
        format_collection(&result)
    ))
}

async fn structured_input(geocoder: &dyn GeocodingClient) -> Result<String, MapboxError> {
    let input = StructuredInput {
        address_number: Some("1600".to_string()),
        street: Some("Pennsylvania Avenue NW".to_string()),
        place: Some("Washington".to_string()),
        region: Some("DC".to_string()),
        country: Some("US".to_string()),
        autocomplete: Some(false),
        ..Default::default()
    };
    let result = geocoder.forward_structured(input).await?;
    Ok(format_collection(&result))
}

async fn reverse(geocoder: &dyn GeocodingClient) -> Result<String, MapboxError> {
    let location = Location::new(-77.036_556, 38.897_708)?;
    let opts = ReverseOptions {
        types: Some(FeatureType::Address.to_string()),
        limit: Some(1),
        country: Some("us".to_string()),
        ..Default::default()
    };
    let result = geocoder.reverse(location, opts).await?;
    Ok(match result.first() {
        Some(feature) => format!(
            "  {}\n  Full address: {}\n  Feature type: {}",
            format_feature(feature),
            feature.full_address().unwrap_or("-"),
            feature
                .feature_type()
                .map_or_else(|| "-".to_string(), |t| t.to_string())
        ),
        None => "  (no results)".to_string(),
    })
}

async fn permanent(geocoder: &dyn GeocodingClient) -> Result<String, MapboxError> {
    let opts = ForwardOptions {
        permanent: true,
        limit: Some(1),
        country: Some("us".to_string()),
        ..Default::default()
    };
    let result = geocoder.forward("Empire State Building", opts).await?;
    Ok(format!(
        "{}\n  Note: this result may be stored permanently",
        format_collection(&result)
    ))
}

async fn batch(geocoder: &dyn GeocodingClient) -> Result<String, MapboxError> {
    let queries = vec![
        BatchQuery {
            country: Some("us".to_string()),
            limit: Some(1),
            ..BatchQuery::forward("New York City").with_types(&[FeatureType::Place])
        },
        BatchQuery::reverse(Location::new(-73.986_136, 40.748_895)?)
            .with_types(&[FeatureType::Address]),
        BatchQuery {
            address_number: Some("123".to_string()),
            street: Some("Main Street".to_string()),
            place: Some("Boston".to_string()),
            region: Some("MA".to_string()),
            country: Some("us".to_string()),
            ..Default::default()
        },
    ];

    let results = geocoder.batch(&queries, BatchOptions::default()).await?;

    let mut text = format!("  {} queries processed:", results.len());
    for (i, collection) in results.iter().enumerate() {
        text.push_str(&format!("\n  Query {}: {} results", i + 1, collection.len()));
        if let Some(feature) = collection.first() {
            text.push_str(&format!("\n    -> {}", format_feature(feature)));
        }
    }
    Ok(text)
}

async fn helpers(geocoder: &dyn GeocodingClient) -> Result<String, MapboxError> {
    let central_park = Location::new(-73.968_285, 40.785_091)?;
    let mut lines = Vec::new();

    let with_types = geocoder
        .forward_with_types(
            "Central Park",
            &[FeatureType::Address, FeatureType::Place],
            ForwardOptions::default(),
        )
        .await?;
    if let Some(f) = with_types.first() {
        lines.push(format!("  With types filter: {}", format_feature(f)));
    }

    let nearby = geocoder
        .forward_with_proximity(
            "Starbucks",
            central_park,
            ForwardOptions {
                limit: Some(1),
                ..Default::default()
            },
        )
        .await?;
    if let Some(f) = nearby.first() {
        lines.push(format!("  Near Central Park: {}", format_feature(f)));
    }

    let reversed = geocoder
        .reverse_with_types(central_park, &[FeatureType::Address], ReverseOptions::default())
        .await?;
    if let Some(f) = reversed.first() {
        lines.push(format!("  Reverse with types: {}", format_feature(f)));
    }

    if lines.is_empty() {
        lines.push("  (no results)".to_string());
    }
    Ok(lines.join("\n"))
}
