use crate::mock::{RecordingTemplate, ViewLog};
use crate::{ResourceKind, ViewSelector};

mod resource_input_test;
mod resource_state_test;

pub type TestResource = crate::ResourceState<String, String>;

/// A selector with a recording template in every slot.
pub fn recording_selector(log: &ViewLog) -> ViewSelector<String, String> {
    ResourceKind::ALL
        .into_iter()
        .fold(ViewSelector::new(), |selector, kind| {
            selector.with_template(kind, RecordingTemplate::new(kind, log))
        })
}
