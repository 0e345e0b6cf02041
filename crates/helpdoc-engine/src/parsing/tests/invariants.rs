use crate::render::{Event, check_balanced};

/// Validates the shape of a recorded event stream.
///
/// Asserts that:
/// - Start and end events form a valid bracket sequence
/// - List depth never goes negative and returns to zero
/// - At most one module is opened, and it encloses everything else
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(events: &[Event]) {
    if let Err(err) = check_balanced(events) {
        panic!("unbalanced events: {err}\n{events:#?}");
    }

    let mut list_depth = 0i32;
    for event in events {
        match event {
            Event::ListStart => list_depth += 1,
            Event::ListEnd => list_depth -= 1,
            _ => {}
        }
        assert!(list_depth >= 0, "list depth went negative: {events:#?}");
    }
    assert_eq!(list_depth, 0, "lists left open: {events:#?}");

    let modules = events
        .iter()
        .filter(|e| matches!(e, Event::ModuleStart { .. }))
        .count();
    assert!(modules <= 1, "more than one module: {events:#?}");
    if modules == 1 {
        assert!(
            matches!(events.first(), Some(Event::ModuleStart { .. })),
            "module does not open the stream: {events:#?}"
        );
        assert_eq!(events.last(), Some(&Event::ModuleEnd));
    }
}
