//! Property tests for the Markdown doctor.

use proptest::prelude::*;

use nbpost::doctor;

/// Markdown-ish text built from the fragments the doctor reacts to.
fn markdown_fragments() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("```"),
            Just("```python"),
            Just("\n"),
            Just("\n\n\n"),
            Just("    "),
            Just("     "),
            Just("out"),
            Just("a b"),
            Just(" "),
        ],
        0..48,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: applying the doctor twice equals applying it once.
    #[test]
    fn property_doctor_idempotent_on_fragments(input in markdown_fragments()) {
        let once = doctor(&input);
        prop_assert_eq!(doctor(&once), once);
    }

    /// PROPERTY: idempotence holds for arbitrary text too.
    #[test]
    fn property_doctor_idempotent_on_arbitrary(input in "(?s).{0,256}") {
        let once = doctor(&input);
        prop_assert_eq!(doctor(&once), once);
    }

    /// PROPERTY: no run of three newlines survives after a fence marker.
    #[test]
    fn property_no_blank_runs_after_fence(input in markdown_fragments()) {
        prop_assert!(!doctor(&input).contains("```\n\n\n"));
    }

    /// PROPERTY: the doctor only ever removes or normalizes newlines.
    #[test]
    fn property_doctor_preserves_non_newline_text(input in markdown_fragments()) {
        let strip = |s: &str| s.chars().filter(|c| *c != '\n').collect::<String>();
        prop_assert_eq!(strip(&doctor(&input)), strip(&input));
    }
}
