// Keyboard teleop session: read key -> intent -> wheel speeds -> publish
// Any exit (Ctrl-C, external signal, error) publishes a single all-zero command.

use std::io::Write;
use tracing::{debug, error, info, warn};

use crate::config::{Args, HELP_TEXT};
use crate::error::TeleopError;
use crate::input::{Key, KeySource, TerminalKeys};
use crate::kinematics::{MotionIntent, WheelSpeeds, mecanum_control_with_scale, motion_for};
use crate::publisher::{WheelPublishers, WheelSink};
use crate::shutdown::{ShutdownFlag, install_signal_listener};

/// Why the session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Interrupt,
    Shutdown,
}

/// Intent carried between key presses
#[derive(Debug, Clone)]
pub struct TeleopState {
    intent: MotionIntent,
    linear_scale: f64,
}

impl TeleopState {
    pub fn new(linear_scale: f64) -> Self {
        Self {
            intent: MotionIntent::stop(),
            linear_scale,
        }
    }

    pub fn intent(&self) -> MotionIntent {
        self.intent
    }

    /// Update the intent from a key; `None` (nothing to publish) for unbound keys
    pub fn apply(&mut self, key: char) -> Option<WheelSpeeds> {
        let intent = motion_for(key)?;
        self.intent = intent;
        Some(mecanum_control_with_scale(intent, self.linear_scale))
    }
}

/// Drive the robot from `keys` until interrupted, then stop it
///
/// The stop command goes out exactly once whatever ended the loop. Errors are
/// returned after the stop for the caller to report.
pub async fn run_session<K, S, W>(
    keys: &mut K,
    sink: &mut S,
    state: &mut TeleopState,
    out: &mut W,
) -> Result<StopReason, TeleopError>
where
    K: KeySource,
    S: WheelSink,
    W: Write,
{
    let outcome = drive(keys, sink, state, out).await;

    match &outcome {
        Ok(reason) => info!("Teleop stopped: {:?}", reason),
        Err(e) => error!("Teleop failed: {}", e),
    }

    info!("Stopping all wheels");
    if let Err(e) = sink.publish(&WheelSpeeds::zero()).await {
        warn!("Failed to publish stop command: {}", e);
    }

    outcome
}

async fn drive<K, S, W>(
    keys: &mut K,
    sink: &mut S,
    state: &mut TeleopState,
    out: &mut W,
) -> Result<StopReason, TeleopError>
where
    K: KeySource,
    S: WheelSink,
    W: Write,
{
    loop {
        let key = keys.next_key().await?;
        debug!("Key: {:?}", key);

        let ch = match key {
            None => return Ok(StopReason::Shutdown),
            Some(Key::Interrupt) => return Ok(StopReason::Interrupt),
            Some(Key::Other) => continue,
            Some(Key::Char(ch)) => ch,
        };

        let Some(speeds) = state.apply(ch) else {
            continue;
        };

        sink.publish(&speeds).await?;
        writeln!(out, "{}", speeds.status_line())?;
    }
}

/// Open Zenoh, declare the wheel publishers and run the keyboard session
pub async fn run(args: Args) -> Result<(), TeleopError> {
    args.validate()?;

    // Handlers go in before anything can move the robot
    let shutdown = ShutdownFlag::new();
    let listener = install_signal_listener(shutdown.clone())?;

    info!("Opening Zenoh session...");
    let session = zenoh::open(args.load_zenoh_config()?).await?;

    info!("Setting up wheel publishers...");
    let mut sink = WheelPublishers::declare(&session, &args.namespace).await?;

    let mut keys = TerminalKeys::new(shutdown);
    let mut state = TeleopState::new(args.linear_scale);
    let mut stdout = std::io::stdout();

    println!("{}", HELP_TEXT);
    info!("Teleop started, linear scale {}", args.linear_scale);

    let result = run_session(&mut keys, &mut sink, &mut state, &mut stdout).await;

    listener.abort();
    if let Err(e) = session.close().await {
        warn!("Failed to close Zenoh session: {}", e);
    }
    result.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use crate::config::DEFAULT_LINEAR_SCALE;

    /// Replays a fixed list of reads; `None` entries stand for a shutdown
    struct ScriptedKeys {
        reads: VecDeque<Result<Option<Key>, TeleopError>>,
    }

    impl ScriptedKeys {
        fn chars(keys: &str) -> Self {
            let mut reads: VecDeque<_> = keys.chars().map(|ch| Ok(Some(Key::Char(ch)))).collect();
            reads.push_back(Ok(Some(Key::Interrupt)));
            Self { reads }
        }

        fn reads(reads: Vec<Result<Option<Key>, TeleopError>>) -> Self {
            Self {
                reads: reads.into(),
            }
        }
    }

    impl KeySource for ScriptedKeys {
        async fn next_key(&mut self) -> Result<Option<Key>, TeleopError> {
            self.reads.pop_front().expect("script ran out of keys")
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        published: Vec<WheelSpeeds>,
        fail_after: Option<usize>,
    }

    impl WheelSink for RecordingSink {
        async fn publish(&mut self, speeds: &WheelSpeeds) -> Result<(), TeleopError> {
            if self.fail_after == Some(self.published.len()) {
                self.fail_after = None;
                return Err(TeleopError::Zenoh("bus down".into()));
            }
            self.published.push(*speeds);
            Ok(())
        }
    }

    async fn session(
        keys: &mut ScriptedKeys,
        sink: &mut RecordingSink,
    ) -> (Result<StopReason, TeleopError>, String) {
        let mut state = TeleopState::new(DEFAULT_LINEAR_SCALE);
        let mut out = Vec::new();
        let result = run_session(keys, sink, &mut state, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_forward_then_interrupt() {
        let mut keys = ScriptedKeys::chars("w");
        let mut sink = RecordingSink::default();

        let (result, out) = session(&mut keys, &mut sink).await;

        assert_eq!(result.unwrap(), StopReason::Interrupt);
        assert_eq!(
            sink.published,
            vec![WheelSpeeds::new(5.0, 5.0, 5.0, 5.0), WheelSpeeds::zero()]
        );
        assert_eq!(out, "FL: 5.00, FR: 5.00, RL: 5.00, RR: 5.00\n");
    }

    #[tokio::test]
    async fn test_immediate_interrupt_stops_once() {
        let mut keys = ScriptedKeys::chars("");
        let mut sink = RecordingSink::default();

        let (result, out) = session(&mut keys, &mut sink).await;

        assert_eq!(result.unwrap(), StopReason::Interrupt);
        assert_eq!(sink.published, vec![WheelSpeeds::zero()]);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_unbound_keys_do_not_publish() {
        let mut keys = ScriptedKeys::reads(vec![
            Ok(Some(Key::Char('k'))),
            Ok(Some(Key::Other)),
            Ok(Some(Key::Char('a'))),
            Ok(Some(Key::Char('W'))),
            Ok(Some(Key::Interrupt)),
        ]);
        let mut sink = RecordingSink::default();

        let (result, out) = session(&mut keys, &mut sink).await;

        assert!(result.is_ok());
        assert_eq!(
            sink.published,
            vec![WheelSpeeds::new(-5.0, 5.0, 5.0, -5.0), WheelSpeeds::zero()]
        );
        assert_eq!(out.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_repeated_stop() {
        let mut keys = ScriptedKeys::chars("sss");
        let mut sink = RecordingSink::default();

        let (_, out) = session(&mut keys, &mut sink).await;

        assert_eq!(sink.published, vec![WheelSpeeds::zero(); 4]);
        for line in out.lines() {
            assert_eq!(line, "FL: 0.00, FR: 0.00, RL: 0.00, RR: 0.00");
        }
    }

    #[tokio::test]
    async fn test_external_shutdown_stops_once() {
        let mut keys = ScriptedKeys::reads(vec![Ok(Some(Key::Char('q'))), Ok(None)]);
        let mut sink = RecordingSink::default();

        let (result, _) = session(&mut keys, &mut sink).await;

        assert_eq!(result.unwrap(), StopReason::Shutdown);
        assert_eq!(
            sink.published,
            vec![WheelSpeeds::new(-5.0, 5.0, -5.0, 5.0), WheelSpeeds::zero()]
        );
    }

    #[tokio::test]
    async fn test_read_error_still_stops() {
        let mut keys = ScriptedKeys::reads(vec![
            Ok(Some(Key::Char('w'))),
            Err(std::io::Error::other("tty gone").into()),
        ]);
        let mut sink = RecordingSink::default();

        let (result, out) = session(&mut keys, &mut sink).await;

        assert!(matches!(result, Err(TeleopError::Io(_))));
        assert_eq!(sink.published.last(), Some(&WheelSpeeds::zero()));
        assert_eq!(sink.published.len(), 2);
        // Only the status line; the error itself is reported once, by main
        assert_eq!(out, "FL: 5.00, FR: 5.00, RL: 5.00, RR: 5.00\n");
    }

    #[tokio::test]
    async fn test_publish_error_still_stops() {
        let mut keys = ScriptedKeys::chars("wx");
        let mut sink = RecordingSink {
            fail_after: Some(1),
            ..Default::default()
        };

        let (result, _) = session(&mut keys, &mut sink).await;

        assert!(matches!(result, Err(TeleopError::Zenoh(_))));
        assert_eq!(
            sink.published,
            vec![WheelSpeeds::new(5.0, 5.0, 5.0, 5.0), WheelSpeeds::zero()]
        );
    }

    #[test]
    fn test_state_keeps_last_intent() {
        let mut state = TeleopState::new(DEFAULT_LINEAR_SCALE);
        assert_eq!(state.intent(), MotionIntent::stop());

        assert!(state.apply('z').is_some());
        assert_eq!(state.intent(), MotionIntent::new(0.7, 0.7, 0.0));

        assert!(state.apply('?').is_none());
        assert_eq!(state.intent(), MotionIntent::new(0.7, 0.7, 0.0));
    }
}
