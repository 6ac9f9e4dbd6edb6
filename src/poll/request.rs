use crate::core::config::PollSettings;
use crate::core::models::{
    POLL_TIME_ZONE_NAME, POLL_TITLE, PollConfig, PollMeta, PollOption, PollRequest,
};

impl PollRequest {
    /// Weekly multiple-choice poll with the deployment's selection limits.
    #[must_use]
    pub fn weekly(options: Vec<PollOption>, settings: &PollSettings) -> Self {
        Self {
            title: POLL_TITLE.to_string(),
            poll_options: options,
            poll_config: PollConfig::from(settings),
            poll_meta: PollMeta {
                timezone: POLL_TIME_ZONE_NAME.to_string(),
            },
            poll_type: "multiple_choice".to_string(),
        }
    }
}
