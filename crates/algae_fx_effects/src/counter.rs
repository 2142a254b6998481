//! # Statistic Counter
//!
//! A number that counts up from zero the first time its element scrolls
//! into view, then pulses once it lands on the final value.
//!
//! The element is "in view" when at least `visibility_threshold` of it
//! overlaps the viewport shrunk by `root_margin_px` at the top and bottom.
//! Counting starts at most once per mount.

use algae_fx_core::{Color, CounterConfig, Easing, FxResult, Rect, TickSource, TimerId, Vec2};
use tracing::{debug, trace};

use crate::render::DrawCommand;
use crate::scroll::ScrollSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CounterTimer {
    Start,
    Tick,
}

/// Where a counter is in its one-shot run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterPhase {
    /// Not yet seen.
    #[default]
    Waiting,
    /// Seen; waiting out the start delay.
    Delayed,
    /// Ticking since `started_at_ms`.
    Counting {
        /// Virtual time counting began (ms).
        started_at_ms: u64,
    },
    /// Reached the final value.
    Done,
}

/// Fraction (0-1) of `element` inside the viewport after the root margin.
#[must_use]
pub fn visible_fraction(element: Rect, sample: ScrollSample, root_margin_px: f32) -> f32 {
    let area = element.area();
    if area <= 0.0 {
        return 0.0;
    }
    let viewport = sample
        .viewport(element.x, element.width)
        .inset_vertical(root_margin_px);
    element
        .intersection(&viewport)
        .map_or(0.0, |overlap| overlap.area() / area)
}

/// A count-up statistic.
#[derive(Debug, Clone)]
pub struct StatCounter {
    label: String,
    value: u64,
    delay_ms: u64,
    /// Placement relative to the owning section (px).
    slot: Rect,
    config: CounterConfig,
    ticks: TickSource<CounterTimer>,
    interval: Option<TimerId>,
    element: Option<Rect>,
    phase: CounterPhase,
    count: u64,
    pulse: bool,
}

impl StatCounter {
    /// Creates a counter for `value`, placed at `slot` inside its section.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(
        label: impl Into<String>,
        value: u64,
        delay_ms: u64,
        slot: Rect,
        config: CounterConfig,
    ) -> FxResult<Self> {
        config.validate()?;
        Ok(Self {
            label: label.into(),
            value,
            delay_ms,
            slot,
            config,
            ticks: TickSource::new(),
            interval: None,
            element: None,
            phase: CounterPhase::Waiting,
            count: 0,
            pulse: false,
        })
    }

    /// Caption shown under the number.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Final value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Currently displayed number.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Displayed text, number plus suffix.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", self.count, self.config.suffix)
    }

    /// True once the final value is shown.
    #[must_use]
    pub fn pulse(&self) -> bool {
        self.pulse
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    /// Timers still scheduled.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.ticks.pending_timers()
    }

    /// True between `mount` and `unmount`.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.element.is_some()
    }

    /// Places the element inside `section` (document px) and resets the run.
    pub fn mount(&mut self, section: Rect) {
        self.ticks.cancel_all();
        self.interval = None;
        self.element = Some(self.place(section));
        self.phase = CounterPhase::Waiting;
        self.count = 0;
        self.pulse = false;
    }

    /// Follows the owning section to new bounds (document px).
    ///
    /// `None` means the section element is gone: an unfinished run is
    /// cancelled and rewound, and nothing starts or renders until bounds
    /// return. A finished run stays finished.
    pub fn set_section(&mut self, section: Option<Rect>) {
        if let Some(section) = section {
            self.element = Some(self.place(section));
            return;
        }
        if self.element.take().is_none() {
            return;
        }
        self.ticks.cancel_all();
        self.interval = None;
        if self.phase != CounterPhase::Done {
            self.phase = CounterPhase::Waiting;
            self.count = 0;
        }
        trace!(label = %self.label, "counter lost its section");
    }

    fn place(&self, section: Rect) -> Rect {
        Rect::new(
            section.x + self.slot.x,
            section.y + self.slot.y,
            self.slot.width,
            self.slot.height,
        )
    }

    /// Starts the run the first time the element is in view.
    pub fn on_scroll(&mut self, sample: ScrollSample) {
        if self.phase != CounterPhase::Waiting {
            return;
        }
        let Some(element) = self.element else {
            return;
        };

        let fraction = visible_fraction(element, sample, self.config.root_margin_px);
        if fraction <= 0.0 || fraction < self.config.visibility_threshold {
            return;
        }

        trace!(label = %self.label, fraction, "counter in view");
        if self.delay_ms == 0 {
            self.start_counting();
        } else {
            self.ticks.set_timeout(self.delay_ms, CounterTimer::Start);
            self.phase = CounterPhase::Delayed;
        }
    }

    fn start_counting(&mut self) {
        self.phase = CounterPhase::Counting {
            started_at_ms: self.ticks.now_ms(),
        };
        self.interval = Some(self.ticks.set_interval(self.config.tick_ms, CounterTimer::Tick));
    }

    fn tick(&mut self) {
        let CounterPhase::Counting { started_at_ms } = self.phase else {
            return;
        };
        let elapsed = self.ticks.now_ms() - started_at_ms;
        let t = (elapsed as f32 / self.config.duration_ms as f32).min(1.0);

        if t >= 1.0 {
            self.count = self.value;
            if let Some(interval) = self.interval.take() {
                self.ticks.cancel(interval);
            }
            self.phase = CounterPhase::Done;
            self.pulse = true;
            debug!(label = %self.label, value = self.value, "counter finished");
            return;
        }

        let eased = Easing::ExpoOut.ease(t);
        let next = (eased * self.value as f32).floor() as u64;
        self.count = self.count.max(next.min(self.value));
    }

    /// Advances the clock by `dt_ms`.
    pub fn advance(&mut self, dt_ms: u64) {
        let until = self.ticks.now_ms() + dt_ms;
        while let Some(fired) = self.ticks.next_due(until) {
            match fired.event {
                CounterTimer::Start => {
                    if self.phase == CounterPhase::Delayed {
                        self.start_counting();
                    }
                }
                CounterTimer::Tick => self.tick(),
            }
        }
        self.ticks.settle(until);
    }

    /// Emits the number and its caption in section-local px.
    pub fn render(&self, commands: &mut Vec<DrawCommand>) {
        if self.element.is_none() {
            return;
        }
        let color = if self.pulse { Color::ALGAE } else { Color::DEEP_TEAL };
        commands.push(DrawCommand::Text {
            text: self.display(),
            position: Vec2::new(self.slot.x, self.slot.y),
            color,
            font_size: 48.0,
            bold: true,
        });
        commands.push(DrawCommand::Text {
            text: self.label.clone(),
            position: Vec2::new(self.slot.x, self.slot.y + 60.0),
            color: Color::CHARCOAL,
            font_size: 16.0,
            bold: false,
        });
    }

    /// Cancels the interval and forgets the element.
    pub fn unmount(&mut self) {
        let cancelled = self.ticks.cancel_all();
        self.interval = None;
        self.element = None;
        if cancelled > 0 {
            trace!(label = %self.label, cancelled, "counter unmounted mid-run");
        }
    }
}
