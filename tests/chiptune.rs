use gallery_wasm::chiptune::{
    sixteenth_s, Note, Sequencer, LOOKAHEAD_S, MELODY, PLAY_LABEL, RELEASE_S, STOP_LABEL,
};

#[test]
fn sixteenth_at_120_bpm() {
    assert_eq!(sixteenth_s(), 0.125);
}

#[test]
fn stopped_sequencer_schedules_nothing() {
    let mut seq = Sequencer::default();
    assert!(!seq.is_playing());
    assert_eq!(seq.label(), PLAY_LABEL);
    assert!(seq.schedule(10.0).is_empty());
}

#[test]
fn schedules_only_within_the_lookahead() {
    let mut seq = Sequencer::default();
    assert!(seq.toggle(2.0));
    assert_eq!(seq.label(), STOP_LABEL);

    let first = seq.schedule(2.0);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].start, 2.0);
    assert_eq!(first[0].frequency, Note::C4.frequency());
    assert_eq!(first[0].duration, 0.5);

    // nothing new until the next note comes within the lookahead window
    assert!(seq.schedule(2.3).is_empty());
    let next = seq.schedule(2.5 - LOOKAHEAD_S + 0.01);
    assert_eq!(next.len(), 1);
    assert_eq!(next[0].start, 2.5);
}

#[test]
fn melody_loops_and_restart_rewinds() {
    let mut seq = Sequencer::default();
    seq.toggle(0.0);
    let total: f64 = MELODY.iter().map(|&(_, n)| f64::from(n) * sixteenth_s()).sum();
    let notes = seq.schedule(total);
    assert_eq!(notes.len(), MELODY.len() + 1);
    assert_eq!(seq.index(), 1);
    assert_eq!(notes[MELODY.len()].start, total);

    assert!(!seq.toggle(5.0));
    assert!(seq.toggle(9.0));
    assert_eq!(seq.index(), 0);
    assert_eq!(seq.schedule(9.0)[0].start, 9.0);
}

#[test]
fn release_ends_before_the_note_stops() {
    let mut seq = Sequencer::default();
    seq.toggle(1.0);
    let note = seq.schedule(1.0)[0];
    assert_eq!(note.end(), 1.5);
    assert!((note.release_end() - (1.5 - RELEASE_S)).abs() < 1e-12);
}
