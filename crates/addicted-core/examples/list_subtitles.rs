//! Debug script to list subtitles for one episode against the live site
//!
//! Run with: cargo run --example list_subtitles -p addicted-core -- <show> <season> <episode>

use addicted_core::{AddictedScraper, filter_by_language, order_by_downloads};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let show = args.next().unwrap_or_else(|| "Doctor Who".to_string());
    let season: u32 = args.next().as_deref().unwrap_or("7").parse()?;
    let episode: u32 = args.next().as_deref().unwrap_or("5").parse()?;

    let scraper = AddictedScraper::new()?;

    println!("Resolving '{}' in the show catalog...\n", show);

    let Some(show_id) = scraper.show_id(&show).await? else {
        println!("Show not found in catalog!");
        return Ok(());
    };

    println!("Show id: {}", show_id);
    println!("Listing subtitles for {}x{}...\n", season, episode);

    let subtitles = scraper.subtitles(&show_id, season, episode).await?;

    if subtitles.is_empty() {
        println!("No subtitles offered for this episode.");
        return Ok(());
    }

    for (i, sub) in subtitles.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, sub.language, sub.release);
        println!("   Downloads: {}", sub.downloads);
        println!("   Link: {}", sub.link);
        println!();
    }

    let english = order_by_downloads(&filter_by_language(&subtitles, "english"));
    if let Some(best) = english.last() {
        println!(
            "Most downloaded english subtitle: {} ({} downloads)",
            best.release, best.downloads
        );
    }

    Ok(())
}
