//! Image Matching Example
//!
//! This example matches a local image against the catalog, then detects the
//! objects in it and reports the first detected region as feedback.
//!
//! To run this example:
//! ```
//! VISUAL_SEARCH_API_KEY=your_api_key VISUAL_SEARCH_DEBUG=true \
//!     cargo run --example match_image -- path/to/image.jpg
//! ```

use visual_search_sdk::{error::Result, Feedback, ResultEnvelope, SdkConfig, VisualSearch};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("debug"));

    let Some(image_path) = std::env::args().nth(1) else {
        eprintln!("Usage: match_image <image.jpg>");
        std::process::exit(1);
    };

    let image = match tokio::fs::read(&image_path).await {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Failed to read {}: {}", image_path, e);
            std::process::exit(1);
        }
    };

    // Reads VISUAL_SEARCH_API_KEY, VISUAL_SEARCH_BASE_URL, VISUAL_SEARCH_DEBUG, ...
    let sdk = VisualSearch::new(SdkConfig::from_env()?)?;

    println!("Matching {} ({} bytes)...", image_path, image.len());

    let result = sdk
        .image_matching()
        .limit(5)?
        .threshold(0.3)?
        .language("en")
        .match_image(image.clone())
        .await?;

    let (request_id, session_id) = match result {
        ResultEnvelope::Success(response) => {
            println!("\nOffers:");
            for (i, offer) in response.offers.iter().enumerate() {
                println!(
                    "  {}. {} [{}] score={:.2}",
                    i + 1,
                    offer.title.as_deref().unwrap_or("untitled"),
                    offer.sku.as_deref().unwrap_or("no sku"),
                    offer.score
                );
            }
            (response.request_id, response.session_id)
        }
        ResultEnvelope::Failure(error) => {
            eprintln!("Matching failed: {}", error);
            return Ok(());
        }
    };

    let detection = sdk.object_detection().detect(image).await?;
    let Some(object) = detection.value().and_then(|r| r.objects.first().cloned()) else {
        println!("\nNo objects detected");
        return Ok(());
    };

    println!(
        "\nDetected {} ({:.2})",
        object.class_name.as_deref().unwrap_or("object"),
        object.confidence
    );

    let region = object.region;
    let feedback = Feedback::region(
        f64::from(region.left),
        f64::from(region.top),
        f64::from(region.width()),
        f64::from(region.height()),
    )?;

    let mut builder = sdk.feedback();
    if let Some(request_id) = request_id {
        builder.request_id(request_id);
    }
    if let Some(session_id) = session_id {
        builder.session(session_id);
    }

    match builder.send(feedback).await? {
        ResultEnvelope::Success(()) => println!("Region feedback sent"),
        ResultEnvelope::Failure(error) => eprintln!("Feedback failed: {}", error),
    }

    Ok(())
}
