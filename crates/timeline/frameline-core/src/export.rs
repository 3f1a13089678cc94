//! Declarative export: a parameter block plus `percentage -> property text`
//! keyframes, built from enumerated breakpoints.
//!
//! Text form:
//! ```text
//! animation-name: <id>;
//! animation-duration: <s>s;
//! animation-delay: <s>s;
//! animation-iteration-count: <n|infinite>;
//! animation-direction: <dir>;
//! animation-fill-mode: <mode>;
//! animation-timing-function: <easing>;
//! @keyframes <id> {
//! <pct>%{<property text>}
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::baking::{baked_count, bakes_whole_run, Breakpoint};
use crate::config::{format_decimal, Config};
use crate::interp::Easing;
use crate::state::{Direction, FillMode, IterationCount, TimelineState};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationParams {
    pub name: String,
    /// Seconds of the exported run, already divided by the play speed.
    pub duration: f64,
    /// Seconds, already divided by the play speed.
    pub delay: f64,
    pub iteration_count: IterationCount,
    pub direction: Direction,
    pub fill_mode: FillMode,
    pub timing_function: Easing,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyframesExport {
    pub params: AnimationParams,
    /// `(percentage, property text)` in output order.
    pub keyframes: Vec<(String, String)>,
}

impl AnimationParams {
    /// Parameters describing the baked run of `state`.
    ///
    /// Finite runs up to [`crate::baking::MAX_BAKED_ITERATIONS`] are fully enumerated, so they
    /// play once forwards. Longer and infinite runs bake one cycle and let the
    /// consumer repeat it.
    pub fn for_state(name: impl Into<String>, state: &TimelineState, cycle: f64) -> Self {
        let span = baked_count(state.iteration_count) * cycle;
        let iteration_count = match state.iteration_count {
            count if bakes_whole_run(count) => IterationCount::Finite(1.0),
            count => count,
        };
        let direction = if bakes_whole_run(state.iteration_count) || !state.direction.alternates() {
            Direction::Normal
        } else {
            Direction::Alternate
        };
        Self {
            name: name.into(),
            duration: span / state.play_speed,
            delay: state.delay / state.play_speed,
            iteration_count,
            direction,
            fill_mode: state.fill_mode,
            timing_function: state.easing,
        }
    }
}

/// Decimal places for percentages. At least `decimals`, and enough that two
/// breakpoints `threshold` apart over `span` never print the same percentage.
fn percent_decimals(span: f64, threshold: f64, decimals: u32) -> u32 {
    if !threshold.is_finite() || threshold <= 0.0 || !span.is_finite() {
        return decimals;
    }
    let step = threshold / span * 100.0;
    let needed = (-step.log10()).ceil() + 1.0;
    if needed.is_finite() {
        decimals.max(needed.clamp(0.0, MAX_PERCENT_DECIMALS as f64) as u32)
    } else {
        decimals
    }
}

const MAX_PERCENT_DECIMALS: u32 = 15;

/// Encode `breakpoints` into an export. `None` when there is nothing to export.
///
/// With a delay the list opens with a `0` placeholder ahead of the first
/// breakpoint, which also sits at `0`. Keyframe rules keep the later of two
/// equal selectors, so CSS renders the first breakpoint; the placeholder text
/// is only meaningful to consumers reading the list in order.
pub fn build_export(
    name: &str,
    state: &TimelineState,
    config: &Config,
    breakpoints: &[Breakpoint],
    cycle: f64,
) -> Option<KeyframesExport> {
    let (first, last) = (breakpoints.first()?, breakpoints.last()?);
    let params = AnimationParams::for_state(name, state, cycle);
    let total_duration = params.duration;
    if !(total_duration.is_finite() && total_duration > 0.0) {
        return None;
    }
    let decimals = config.decimals;
    let span = state.play_speed * total_duration;
    let pct_decimals = percent_decimals(span, config.threshold, decimals);
    let pct = |offset: f64| format_decimal(offset / span * 100.0, pct_decimals);

    let mut keyframes = Vec::with_capacity(breakpoints.len() + 2);
    if state.delay > 0.0 {
        let held = if state.is_reverse(0) && state.fill_mode.fills_backwards() {
            last
        } else {
            first
        };
        keyframes.push(("0".to_string(), held.frame.to_property_text_with(decimals)));
    }
    for bp in breakpoints {
        keyframes.push((pct(bp.offset), bp.frame.to_property_text_with(decimals)));
    }
    if pct(last.offset) != "100" {
        keyframes.push(("100".to_string(), last.frame.to_property_text_with(decimals)));
    }

    Some(KeyframesExport { params, keyframes })
}

impl KeyframesExport {
    pub fn to_text(&self, decimals: u32) -> String {
        let p = &self.params;
        let mut lines = vec![
            format!("animation-name: {};", p.name),
            format!("animation-duration: {}s;", format_decimal(p.duration, decimals)),
            format!("animation-delay: {}s;", format_decimal(p.delay, decimals)),
            format!("animation-iteration-count: {};", p.iteration_count),
            format!("animation-direction: {};", p.direction),
            format!("animation-fill-mode: {};", p.fill_mode),
            format!("animation-timing-function: {};", p.timing_function),
            format!("@keyframes {} {{", p.name),
        ];
        lines.extend(
            self.keyframes
                .iter()
                .map(|(pct, text)| format!("{pct}%{{{text}}}")),
        );
        lines.push("}".to_string());
        lines.join("\n")
    }
}
