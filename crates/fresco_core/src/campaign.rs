//! Campaign descriptor consumed by the generation pipeline.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Campaign data driving prompt construction.
///
/// Owned by the caller and immutable for the duration of one generation run.
/// Wire format is camelCase; the snake_case aliases accept payloads from
/// callers that have not normalized their field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
#[serde(rename_all = "camelCase")]
pub struct CampaignDescriptor {
    /// Campaign title
    title: String,
    /// Brand the campaign promotes
    #[serde(alias = "brand_name")]
    brand_name: String,
    /// Free-form campaign description
    description: String,
    /// Audience the content should address
    #[serde(alias = "target_audience")]
    target_audience: String,
    /// Ordered campaign goals
    #[builder(default)]
    #[serde(default, alias = "campaign_goals")]
    campaign_goals: Vec<String>,
}

impl CampaignDescriptor {
    /// Creates a builder for `CampaignDescriptor`.
    pub fn builder() -> CampaignDescriptorBuilder {
        CampaignDescriptorBuilder::default()
    }
}
