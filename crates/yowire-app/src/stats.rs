//! Statistics engine.
//!
//! Consumes classified message events, keeps the running counters and the
//! send streak, and writes advisory and summary lines to the console.
//!
//! Reminder selection goes through the [`ReminderPicker`] seam so production
//! can use a real RNG while tests script or seed the choice.

use rand::{Rng, SeedableRng, rngs::StdRng};
use yowire_proto::MessageEvent;

use crate::console::Console;

/// Reminder lines nudging the user toward a Howdy.
const REMINDERS: [&str; 3] = [
    "Yo, the 'Send Howdy' button is a thing.",
    "The 'Send Yo' button is getting a little tired, don't you think?",
    "Try sending a 'Howdy' to everyone.",
];

/// Streak length between reminders.
const REMINDER_INTERVAL: u64 = 5;

/// Received-message count between cool factor reports.
const COOL_FACTOR_INTERVAL: u64 = 10;

/// Picks which reminder to show.
pub trait ReminderPicker {
    /// Pick an index in `0..len`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Production picker backed by a seedable RNG.
#[derive(Debug)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    /// Picker seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    /// Deterministic picker for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ReminderPicker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Running statistics over the message stream.
///
/// Counters cover messages received from others; the streak covers our own
/// sends. All mutation happens through [`Stats::on_event`]; counters are
/// monotonically non-decreasing except the streak, which resets on a sent
/// Howdy.
#[derive(Debug)]
pub struct Stats<P = RandomPicker> {
    yo_count: u64,
    howdy_count: u64,
    msg_count: u64,
    yo_streak: u64,
    picker: P,
}

impl Stats<RandomPicker> {
    /// Stats with the production reminder picker.
    #[must_use]
    pub fn new() -> Self {
        Self::with_picker(RandomPicker::new())
    }
}

impl Default for Stats<RandomPicker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ReminderPicker> Stats<P> {
    /// Stats with an injected reminder picker.
    pub fn with_picker(picker: P) -> Self {
        Self { yo_count: 0, howdy_count: 0, msg_count: 0, yo_streak: 0, picker }
    }

    /// Yos received from other clients.
    #[must_use]
    pub fn yo_count(&self) -> u64 {
        self.yo_count
    }

    /// Howdys received from other clients.
    #[must_use]
    pub fn howdy_count(&self) -> u64 {
        self.howdy_count
    }

    /// Total messages received from other clients.
    #[must_use]
    pub fn msg_count(&self) -> u64 {
        self.msg_count
    }

    /// Consecutive Yos we have sent since the last Howdy.
    #[must_use]
    pub fn yo_streak(&self) -> u64 {
        self.yo_streak
    }

    /// Fold one classified event into the counters.
    ///
    /// Every fifth consecutive sent Yo appends a reminder; every tenth
    /// received message appends the cool factor.
    pub fn on_event(&mut self, event: MessageEvent, console: &mut Console) {
        match event {
            MessageEvent::RecvYo => {
                self.yo_count += 1;
                self.msg_count += 1;
                self.report_cool_factor(console);
            },
            MessageEvent::RecvHowdy => {
                self.howdy_count += 1;
                self.msg_count += 1;
                self.report_cool_factor(console);
            },
            MessageEvent::SentYo => {
                self.yo_streak += 1;
                if self.yo_streak % REMINDER_INTERVAL == 0 {
                    let idx = self.picker.pick(REMINDERS.len());
                    if let Some(line) = REMINDERS.get(idx) {
                        console.append(*line);
                    }
                }
            },
            MessageEvent::SentHowdy => {
                self.yo_streak = 0;
            },
        }
    }

    fn report_cool_factor(&self, console: &mut Console) {
        if self.msg_count == 0 || self.msg_count % COOL_FACTOR_INTERVAL != 0 {
            return;
        }

        let denominator = self.howdy_count + self.yo_count;
        if denominator == 0 {
            // Unreachable while every received message bumps a counter, but
            // a zero denominator must never divide.
            return;
        }

        let cool_factor = self.howdy_count as f64 / denominator as f64;
        console.append(format!("Cool factor: {cool_factor:.2}"));
    }

    /// Append the end-of-session summary. Reads counters, mutates nothing.
    pub fn final_stats(&self, console: &mut Console) {
        console.append("Final Stats");
        console.append(format!("Yo received: {}", self.yo_count));
        console.append(format!("Howdy received: {}", self.howdy_count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Picker that always chooses the given index.
    struct FixedPicker(usize);

    impl ReminderPicker for FixedPicker {
        fn pick(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    fn recv_sequence() -> [MessageEvent; 10] {
        use MessageEvent::{RecvHowdy, RecvYo};
        [
            RecvYo, RecvYo, RecvHowdy, RecvYo, RecvHowdy, RecvHowdy, RecvYo, RecvHowdy, RecvYo,
            RecvHowdy,
        ]
    }

    #[test]
    fn ten_received_events_emit_cool_factor_once() {
        let mut console = Console::new();
        let mut stats = Stats::with_picker(FixedPicker(0));

        for event in recv_sequence() {
            stats.on_event(event, &mut console);
        }

        assert_eq!(stats.yo_count(), 5);
        assert_eq!(stats.howdy_count(), 5);
        assert_eq!(stats.msg_count(), 10);

        let cool_lines: Vec<_> =
            console.lines().filter(|l| l.starts_with("Cool factor")).collect();
        assert_eq!(cool_lines, ["Cool factor: 0.50"]);
    }

    #[test]
    fn cool_factor_tracks_the_ratio_at_each_boundary() {
        let mut console = Console::new();
        let mut stats = Stats::with_picker(FixedPicker(0));

        // 10 Yos, then 10 Howdys: 0.00 at the first boundary, 0.50 at the
        // second.
        for _ in 0..10 {
            stats.on_event(MessageEvent::RecvYo, &mut console);
        }
        for _ in 0..10 {
            stats.on_event(MessageEvent::RecvHowdy, &mut console);
        }

        let cool_lines: Vec<_> =
            console.lines().filter(|l| l.starts_with("Cool factor")).collect();
        assert_eq!(cool_lines, ["Cool factor: 0.00", "Cool factor: 0.50"]);
    }

    #[test]
    fn reminder_fires_exactly_on_streak_multiples_of_five() {
        let mut console = Console::new();
        let mut stats = Stats::with_picker(FixedPicker(2));

        for sent in 1..=14u64 {
            stats.on_event(MessageEvent::SentYo, &mut console);
            let reminders = console.lines().filter(|l| *l == REMINDERS[2]).count();
            assert_eq!(reminders as u64, sent / 5, "wrong reminder count after {sent} sends");
        }
    }

    #[test]
    fn sent_howdy_resets_the_streak() {
        let mut console = Console::new();
        let mut stats = Stats::with_picker(FixedPicker(0));

        for _ in 0..4 {
            stats.on_event(MessageEvent::SentYo, &mut console);
        }
        assert_eq!(stats.yo_streak(), 4);

        stats.on_event(MessageEvent::SentHowdy, &mut console);
        assert_eq!(stats.yo_streak(), 0);

        // Four more Yos stay below the reminder threshold.
        for _ in 0..4 {
            stats.on_event(MessageEvent::SentYo, &mut console);
        }
        assert!(console.is_empty(), "no reminder should have fired: {:?}", console);
    }

    #[test]
    fn received_events_do_not_touch_the_streak() {
        let mut console = Console::new();
        let mut stats = Stats::with_picker(FixedPicker(0));

        stats.on_event(MessageEvent::SentYo, &mut console);
        stats.on_event(MessageEvent::RecvYo, &mut console);
        stats.on_event(MessageEvent::RecvHowdy, &mut console);

        assert_eq!(stats.yo_streak(), 1);
    }

    #[test]
    fn final_stats_emits_exactly_three_lines() {
        let mut console = Console::new();
        let mut stats = Stats::with_picker(FixedPicker(0));

        for event in recv_sequence() {
            stats.on_event(event, &mut console);
        }

        let before = console.len();
        stats.final_stats(&mut console);

        let lines: Vec<_> = console.lines().skip(before).collect();
        assert_eq!(lines, ["Final Stats", "Yo received: 5", "Howdy received: 5"]);
    }

    #[test]
    fn seeded_picker_is_reproducible() {
        let mut a = RandomPicker::seeded(7);
        let mut b = RandomPicker::seeded(7);

        for _ in 0..16 {
            assert_eq!(a.pick(REMINDERS.len()), b.pick(REMINDERS.len()));
        }
    }

    #[test]
    fn random_picker_stays_in_bounds() {
        let mut picker = RandomPicker::new();
        for _ in 0..64 {
            assert!(picker.pick(REMINDERS.len()) < REMINDERS.len());
        }
    }
}
