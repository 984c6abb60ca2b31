//! Simulated visit to the clinic page on a manual clock.
//!
//! Run with: cargo run -p vetsim --example walkthrough

use std::sync::Arc;
use std::time::Duration;

use vetsim::{Key, Page, PageInput, PageLayout, Section, SectionRect, SiteConfig};
use vetsim_core::ManualClock;

fn print_state(label: &str, page: &Page) {
    let nav = page.navigation();
    let hero = page.hero().map(|c| c.current_index());
    let gallery = page
        .gallery()
        .map(|c| c.slide_roles().iter().filter_map(|r| r.css_class()).collect::<Vec<_>>());
    println!(
        "{label:>24}: hero={hero:?} gallery={gallery:?} stats={:?} nav={}{}",
        page.counter_values(),
        nav.active_section(),
        if nav.is_scrolled() { " (scrolled)" } else { "" },
    );
}

fn main() -> vetsim::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let clock = Arc::new(ManualClock::new());
    let layout = PageLayout {
        hero_slides: 3,
        gallery_slides: 5,
        stat_targets: vec![4200, 25, 12],
        sections: vec![
            SectionRect::new("home", 0.0, 900.0),
            SectionRect::new("about", 900.0, 700.0),
            SectionRect::new("gallery", 1600.0, 900.0),
            SectionRect::new("stats", 2500.0, 400.0),
        ],
    };
    let mut page = Page::new(layout, SiteConfig::presets(), clock.clone())?;
    print_state("loaded", &page);

    let step = |page: &mut Page, ms: u64, label: &str| {
        clock.advance(Duration::from_millis(ms));
        page.pump();
        print_state(label, page);
    };

    step(&mut page, 6000, "gallery autoplay");
    step(&mut page, 2000, "hero autoplay");

    page.handle_input(PageInput::Key(Key::ArrowLeft));
    print_state("arrow left", &page);

    if let Some(gallery) = page.gallery_mut() {
        gallery.pointer_entered();
    }
    step(&mut page, 7000, "gallery hovered");

    page.handle_input(PageInput::Scroll {
        scroll_top: 2400.0,
        viewport_height: 900.0,
    });
    page.handle_input(PageInput::SectionVisibility {
        section: Section::Stats,
        visible: true,
    });
    step(&mut page, 1000, "stats counting");
    step(&mut page, 1500, "stats done");

    page.destroy();
    step(&mut page, 10_000, "destroyed");
    Ok(())
}
