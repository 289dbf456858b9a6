use gallery_wasm::nostalgia::{
    probe_from_status, widget_status, Placeholder, Probe, WidgetEvent, FALLBACK_COLOR,
};

#[test]
fn missing_song_is_reported_in_red() {
    let line = widget_status(WidgetEvent::Checked(probe_from_status(false, 404)));
    assert!(line.error);
    assert!(line.text.starts_with("MIDI file not found (404)."));

    let line = widget_status(WidgetEvent::Checked(probe_from_status(true, 200)));
    assert_eq!(line.text, "MIDI Loaded! Ready to play.");
    assert!(!line.error);
}

#[test]
fn widget_status_lines() {
    assert_eq!(widget_status(WidgetEvent::Play).text, "Playing: Ed Sheeran...");
    assert_eq!(widget_status(WidgetEvent::Stop).text, "Stopped.");
    let line = widget_status(WidgetEvent::Checked(Probe::Unreachable));
    assert_eq!(line.text, "Error checking MIDI file.");
    assert!(!line.error);
}

#[test]
fn placeholder_uses_alt_text_and_colour() {
    let p = Placeholder::for_image(Some("Summer 2009"), Some("#c0392b"));
    assert_eq!(p.label, "Summer 2009 (Missing)");
    assert_eq!(p.color, "#c0392b");

    let p = Placeholder::for_image(None, Some(""));
    assert_eq!(p.label, " (Missing)");
    assert_eq!(p.color, FALLBACK_COLOR);
}
