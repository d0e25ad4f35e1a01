// tests/classification_props.rs

use std::time::Duration;

use proptest::prelude::*;

use execzone::adapter::Stage;
use execzone::engine::{Redactor, StageVerdict, classify_stage};
use execzone::exec::ExecutionOutcome;
use execzone::submission::ResultStatus;
use execzone::types::StageKind;

fn stage_strategy() -> impl Strategy<Value = Stage> {
    (any::<bool>(), any::<bool>(), 1u64..60_000).prop_map(|(compile, strict, ms)| Stage {
        kind: if compile { StageKind::Compile } else { StageKind::Run },
        command: "tool".to_string(),
        args: Vec::new(),
        timeout: Duration::from_millis(ms),
        fail_on_stderr: strict,
    })
}

fn outcome_strategy() -> impl Strategy<Value = ExecutionOutcome> {
    (
        -1i32..256,
        proptest::collection::vec(any::<u8>(), 0..64),
        proptest::collection::vec(any::<u8>(), 0..64),
        any::<bool>(),
    )
        .prop_map(|(exit_code, stdout, stderr, timed_out)| {
            if timed_out {
                ExecutionOutcome::timed_out()
            } else {
                ExecutionOutcome {
                    exit_code,
                    stdout,
                    stderr,
                    timed_out: false,
                }
            }
        })
}

proptest! {
    #[test]
    fn verdict_follows_the_stage_policy(
        stage in stage_strategy(),
        outcome in outcome_strategy(),
    ) {
        let verdict = classify_stage(&stage, &outcome, &Redactor::none());

        let should_pass = !outcome.timed_out
            && outcome.exit_code == 0
            && (!stage.fail_on_stderr || outcome.stderr.is_empty());

        match verdict {
            StageVerdict::Passed => prop_assert!(should_pass),
            StageVerdict::Failed(result) => {
                prop_assert!(!should_pass);
                prop_assert!(result.output.is_empty());
                prop_assert!(!result.error_message.is_empty());

                let expected = if outcome.timed_out {
                    ResultStatus::Timeout
                } else if stage.kind == StageKind::Compile {
                    ResultStatus::CompileError
                } else {
                    ResultStatus::RuntimeError
                };
                prop_assert_eq!(result.status, expected);
            }
        }
    }

    #[test]
    fn redaction_is_idempotent(
        id in "ws[0-9a-f]{32}",
        noise in "[ -~]{0,40}",
    ) {
        let dir = format!("/srv/zone/{id}");
        let redactor = Redactor::new(&dir, &id);
        let text = format!("{dir}/{id}.c: {noise} {id}");

        let once = redactor.apply(&text);
        prop_assert_eq!(redactor.apply(&once), once.clone());
        prop_assert!(!once.contains(&id));
        prop_assert!(!once.contains("/srv/zone"));
    }
}
