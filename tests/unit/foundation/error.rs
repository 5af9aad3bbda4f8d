use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::invalid_frame("x")
            .to_string()
            .contains("invalid frame:")
    );
    assert!(
        ReelError::degenerate_dataset("x")
            .to_string()
            .contains("degenerate dataset:")
    );
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ReelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn step_errors_name_step_and_object() {
    let stale = ReelError::stale_reference("fade dot", "dot-3").to_string();
    assert!(stale.contains("'fade dot'"));
    assert!(stale.contains("'dot-3'"));

    let order = ReelError::step_order("draw line", "dot-9").to_string();
    assert!(order.starts_with("step order violation:"));
    assert!(order.contains("'dot-9'"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
