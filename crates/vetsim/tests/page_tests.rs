//! Integration tests for page composition and site configuration.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use vetsim::{
    ConfigError, Key, KeyboardScope, Page, PageInput, PageLayout, ScrollButtonDirection,
    Section, SectionRect, SiteConfig,
};
use vetsim_core::ManualClock;

fn layout() -> PageLayout {
    PageLayout {
        hero_slides: 4,
        gallery_slides: 6,
        stat_targets: vec![3200, 18, 7],
        sections: vec![
            SectionRect::new("hero", 0.0, 1000.0),
            SectionRect::new("about", 1000.0, 800.0),
            SectionRect::new("services", 1800.0, 1200.0),
        ],
    }
}

#[test]
fn test_config_file_drives_page() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [hero]
        autoplay_period_ms = 3000
        transition_duration_ms = 500

        [gallery]
        autoplay = false
        keyboard_scope = "global"
        "#
    )
    .unwrap();

    let config = SiteConfig::from_file(file.path()).unwrap();
    assert_eq!(config.gallery.keyboard_scope, KeyboardScope::Global);

    let clock = Arc::new(ManualClock::new());
    let mut page = Page::new(layout(), config, clock.clone()).unwrap();
    assert!(!page.gallery().unwrap().is_autoplay_running());

    clock.advance(Duration::from_millis(3000));
    assert_eq!(page.pump(), 1);
    assert_eq!(page.hero().unwrap().current_index(), 1);
    assert_eq!(page.gallery().unwrap().current_index(), 0);
}

#[test]
fn test_bad_config_is_reported() {
    assert!(matches!(
        SiteConfig::from_toml_str("[hero]\nspeed = 3"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        SiteConfig::from_file("/nonexistent/vetsim.toml"),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn test_sections_are_isolated() {
    let clock = Arc::new(ManualClock::new());
    let mut page = Page::new(layout(), SiteConfig::presets(), clock.clone()).unwrap();

    page.hero_mut().unwrap().pointer_entered();
    page.carousel_mut(Section::Gallery).unwrap().touch_started(400.0);
    assert!(page.carousel_mut(Section::Gallery).unwrap().touch_ended(300.0));
    assert_eq!(page.gallery().unwrap().current_index(), 1);

    // Hover holds the hero; the gallery's touch pause lifts after two seconds.
    clock.advance(Duration::from_millis(8000));
    page.pump();
    assert_eq!(page.hero().unwrap().current_index(), 0);
    assert!(!page.gallery().unwrap().is_paused());
    assert_eq!(page.gallery().unwrap().current_index(), 2);
}

#[test]
fn test_arrow_keys_are_consumed_only_when_handled() {
    let clock = Arc::new(ManualClock::new());
    let layout = PageLayout {
        hero_slides: 0,
        gallery_slides: 3,
        stat_targets: Vec::new(),
        sections: Vec::new(),
    };
    let mut page = Page::new(layout, SiteConfig::presets(), clock).unwrap();

    page.handle_input(PageInput::SectionVisibility {
        section: Section::Gallery,
        visible: false,
    });
    assert!(!page.handle_input(PageInput::Key(Key::ArrowRight)));
    assert!(!page.handle_input(PageInput::SectionVisibility {
        section: Section::Hero,
        visible: true,
    }));

    page.handle_input(PageInput::SectionVisibility {
        section: Section::Gallery,
        visible: true,
    });
    assert!(page.handle_input(PageInput::Key(Key::from_dom_key("ArrowRight"))));
    assert_eq!(page.gallery().unwrap().current_index(), 1);
}

#[test]
fn test_counters_animate_once() {
    let clock = Arc::new(ManualClock::new());
    let mut page = Page::new(layout(), SiteConfig::presets(), clock.clone()).unwrap();
    let visible = PageInput::SectionVisibility {
        section: Section::Stats,
        visible: true,
    };

    assert!(page.handle_input(visible));
    clock.advance(Duration::from_millis(1000));
    let midway = page.counter_values();
    assert!(midway[0] > 0 && midway[0] < 3200);

    assert!(!page.handle_input(visible));
    clock.advance(Duration::from_millis(1200));
    assert_eq!(page.counter_values(), vec![3200, 18, 7]);
}

#[test]
fn test_dropping_page_releases_timers() {
    let clock = Arc::new(ManualClock::new());
    let page = Page::new(layout(), SiteConfig::presets(), clock).unwrap();
    let timers = page.timers().clone();
    assert_eq!(timers.active_count(), 2);

    drop(page);
    assert_eq!(timers.active_count(), 0);
}

#[test]
fn test_scroll_drives_navigation() {
    let clock = Arc::new(ManualClock::new());
    let mut page = Page::new(layout(), SiteConfig::presets(), clock).unwrap();
    let scroll = |scroll_top| PageInput::Scroll {
        scroll_top,
        viewport_height: 900.0,
    };

    assert!(!page.handle_input(scroll(100.0)));
    assert!(!page.navigation().is_scrolled());
    assert!(page.handle_input(scroll(101.0)));
    assert!(page.navigation().is_scrolled());
    assert_eq!(page.navigation().active_section(), "hero");
    assert_eq!(page.navigation().scroll_button(), ScrollButtonDirection::Down);

    // about is read from 1000 - 900 / 3 = 700 onwards.
    assert!(page.handle_input(scroll(700.0)));
    assert_eq!(page.navigation().active_section(), "about");
    assert_eq!(page.navigation().scroll_button(), ScrollButtonDirection::Up);

    assert!(page.handle_input(scroll(1500.0)));
    assert_eq!(page.navigation().active_section(), "services");

    // Scrolling does not touch the sliders.
    assert_eq!(page.hero().unwrap().current_index(), 0);
}

#[test]
fn test_navigation_config_from_toml() {
    let config = SiteConfig::from_toml_str(
        r#"
        [navigation]
        scrolled_threshold = 20.0
        scroll_button_section = "services"
        "#,
    )
    .unwrap();
    let clock = Arc::new(ManualClock::new());
    let mut page = Page::new(layout(), config, clock).unwrap();

    page.handle_input(PageInput::Scroll {
        scroll_top: 700.0,
        viewport_height: 900.0,
    });
    assert!(page.navigation().is_scrolled());
    assert_eq!(page.navigation().scroll_button(), ScrollButtonDirection::Down);

    page.handle_input(PageInput::Scroll {
        scroll_top: 1500.0,
        viewport_height: 900.0,
    });
    assert_eq!(page.navigation().scroll_button(), ScrollButtonDirection::Up);
}
