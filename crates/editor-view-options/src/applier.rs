//! Pushes a preference snapshot into one editor's rendering sink.

use crate::instance::{EditorInstance, RenderSink};
use crate::option::PreferenceSnapshot;
use tracing::{trace, warn};

/// Translates a [`PreferenceSnapshot`] into [`RenderSink`] calls.
///
/// All three flags are pushed on every call; sinks are idempotent, so re-applying a snapshot
/// leaves the surface unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionApplier;

impl OptionApplier {
    /// Configure `instance` from `snapshot`.
    ///
    /// A disposed instance is skipped: disposal can race with a broadcast that already took its
    /// list of targets.
    pub fn apply<S: RenderSink>(
        &self,
        instance: &mut EditorInstance<S>,
        snapshot: &PreferenceSnapshot,
    ) {
        if instance.is_disposed() {
            warn!(editor = %instance.id(), "skipping option apply on disposed editor");
            return;
        }

        let sink = instance.sink_mut();
        sink.set_wrap(snapshot.word_wrap);
        sink.set_active_line_highlight(snapshot.active_line_highlight);
        sink.set_gutter_visible(snapshot.line_number_gutter);
        instance.record_applied(*snapshot);

        trace!(editor = %instance.id(), ?snapshot, "view options applied");
    }
}
