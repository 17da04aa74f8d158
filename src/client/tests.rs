use super::scroll::{MAX_LINE_CHARS, ScrollWindow, truncate};
use super::watcher::render_lines;
use crate::board::message::Message;

fn messages(n: i64) -> Vec<Message> {
    (0..n).map(|i| Message::new(i, None, format!("m{i}"))).collect()
}

#[test]
fn test_window_stays_put_when_everything_fits() {
    let mut window = ScrollWindow::new(6);
    window.advance(6);
    window.advance(3);
    assert_eq!(window.offset(), 0);
}

#[test]
fn test_window_advances_and_wraps() {
    let mut window = ScrollWindow::new(2);
    let all = messages(3);

    window.advance(3);
    assert_eq!(window.offset(), 1);
    let ids: Vec<i64> = window.visible(&all).iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2]);

    window.advance(3);
    window.advance(3);
    assert_eq!(window.offset(), 0);
}

#[test]
fn test_window_visible_wraps_around_end() {
    let mut window = ScrollWindow::new(3);
    let all = messages(4);
    for _ in 0..3 {
        window.advance(4);
    }
    let ids: Vec<i64> = window.visible(&all).iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![3, 0, 1]);
}

#[test]
fn test_window_survives_shrinking_board() {
    let mut window = ScrollWindow::new(1);
    for _ in 0..4 {
        window.advance(5);
    }
    let few = messages(2);
    assert_eq!(window.visible(&few).len(), 1);
    assert!(window.visible(&[]).is_empty());
}

#[test]
fn test_truncate_long_bodies() {
    let long = "x".repeat(40);
    let short = truncate(&long);
    assert_eq!(short.chars().count(), MAX_LINE_CHARS);
    assert!(short.ends_with("..."));
    assert_eq!(truncate("short"), "short");
}

#[test]
fn test_render_lines() {
    let mut all = messages(2);
    all[1].author = Some("ana".into());
    let lines = render_lines(&all, &ScrollWindow::new(6));
    assert_eq!(lines[0], "Display Board");
    assert_eq!(lines[2], "m0");
    assert_eq!(lines[3], "m1 - ana");

    let lines = render_lines(&[], &ScrollWindow::new(6));
    assert_eq!(lines[2], "(no messages)");
}
