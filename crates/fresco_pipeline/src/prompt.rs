//! Prompt construction for copy, image, and video generation.
//!
//! Prompts embed the campaign descriptor plus tone and platform conditioning.
//! Custom image/video prompts from the settings always win over synthesis.

use fresco_core::{
    CampaignDescriptor, ContentCategory, GenerationCell, GenerationSettings, Platform, Tone,
};
use fresco_providers::AspectRatio;

/// Sampling temperature for a tone. Expressive tones run hotter.
pub fn temperature_for(tone: Tone) -> f32 {
    match tone {
        Tone::Professional | Tone::Informative => 0.7,
        Tone::Casual | Tone::Humorous => 0.9,
        Tone::Enthusiastic => 0.95,
    }
}

/// Aspect ratio hint for a platform: square for Instagram, landscape otherwise.
pub fn aspect_for(platform: Platform) -> AspectRatio {
    match platform {
        Platform::Instagram => AspectRatio::Square,
        _ => AspectRatio::Landscape,
    }
}

fn tone_voice(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => "polished, professional",
        Tone::Casual => "relaxed, casual",
        Tone::Enthusiastic => "energetic, enthusiastic",
        Tone::Informative => "clear, informative",
        Tone::Humorous => "witty, lighthearted",
    }
}

fn platform_guidance(platform: Platform) -> &'static str {
    match platform {
        Platform::Linkedin => {
            "Use a formal, professional voice suited to LinkedIn. Lead with an insight and close with a clear call to action."
        }
        Platform::Twitter => {
            "Keep the post at or under 280 characters, punchy, with 2-3 relevant hashtags."
        }
        Platform::Instagram => {
            "Write a visual-first caption with short paragraphs, a few fitting emoji, and 3-5 hashtags."
        }
        Platform::Facebook => {
            "Write in a conversational voice that invites comments and shares."
        }
        Platform::Email => {
            "Write a subject line on the first line, then a structured 300-500 word body with a greeting, a value proposition, and a call to action."
        }
    }
}

fn category_framing(category: ContentCategory) -> &'static str {
    match category {
        ContentCategory::OrganicPost => {
            "Frame it as an organic post that builds community and brand affinity, not a hard sell."
        }
        ContentCategory::PaidAd => {
            "Frame it as a paid ad: strong hook in the first line, a clear offer, and an explicit call to action."
        }
    }
}

fn visual_style(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => "clean, corporate, minimalist",
        Tone::Casual => "lifestyle photography, natural light",
        Tone::Enthusiastic => "vibrant, dynamic, high-energy",
        Tone::Informative => "clear, editorial composition",
        Tone::Humorous => "playful, bright, whimsical",
    }
}

fn pacing_style(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => "smooth, corporate pacing",
        Tone::Casual => "handheld, natural feel",
        Tone::Enthusiastic => "a high-energy montage with quick cuts",
        Tone::Informative => "steady, explanatory pacing",
        Tone::Humorous => "comedic timing with bright, punchy scenes",
    }
}

/// Builds the copy generation prompt for a cell.
pub fn copy_prompt(
    cell: &GenerationCell,
    campaign: &CampaignDescriptor,
    settings: &GenerationSettings,
) -> String {
    let mut prompt = format!(
        "Write {} marketing copy for a {} on {}.\n\nCampaign: {}\nBrand: {}\nDescription: {}\nTarget audience: {}\n",
        tone_voice(settings.tone),
        match cell.category {
            ContentCategory::OrganicPost => "social post",
            ContentCategory::PaidAd => "paid advertisement",
        },
        cell.platform,
        campaign.title(),
        campaign.brand_name(),
        campaign.description(),
        campaign.target_audience(),
    );

    if !campaign.campaign_goals().is_empty() {
        prompt.push_str(&format!("Goals: {}\n", campaign.campaign_goals().join(", ")));
    }
    if let Some(keywords) = &settings.keywords {
        prompt.push_str(&format!("Keywords to weave in: {}\n", keywords));
    }

    prompt.push('\n');
    prompt.push_str(platform_guidance(cell.platform));
    prompt.push(' ');
    prompt.push_str(category_framing(cell.category));
    prompt
}

/// Builds the image generation prompt for a cell.
///
/// `custom_image_prompt` wins when present; otherwise the prompt is
/// synthesized from the campaign description and tone-mapped visual style.
pub fn image_prompt(
    cell: &GenerationCell,
    campaign: &CampaignDescriptor,
    settings: &GenerationSettings,
) -> String {
    if let Some(custom) = &settings.custom_image_prompt {
        return custom.clone();
    }

    format!(
        "Marketing image for {} ({}): {}. Visual style: {}. No text overlays. Suited to a {} {} on {}.",
        campaign.brand_name(),
        campaign.title(),
        campaign.description(),
        visual_style(settings.tone),
        tone_voice(settings.tone),
        match cell.category {
            ContentCategory::OrganicPost => "organic post",
            ContentCategory::PaidAd => "paid ad",
        },
        cell.platform,
    )
}

/// Builds the video generation prompt for a cell.
///
/// `custom_video_prompt` wins when present; otherwise the prompt is
/// synthesized with tone-mapped pacing. The primary path targets a 5 second,
/// 720p, 24 fps clip; those parameters ride on the request, not the prompt.
pub fn video_prompt(
    cell: &GenerationCell,
    campaign: &CampaignDescriptor,
    settings: &GenerationSettings,
) -> String {
    if let Some(custom) = &settings.custom_video_prompt {
        return custom.clone();
    }

    format!(
        "Short promotional video for {} ({}): {}. Style: {}. Made for a {} on {}.",
        campaign.brand_name(),
        campaign.title(),
        campaign.description(),
        pacing_style(settings.tone),
        match cell.category {
            ContentCategory::OrganicPost => "organic post",
            ContentCategory::PaidAd => "paid ad",
        },
        cell.platform,
    )
}

/// Prompt for degrading a failed media cell to a text script.
pub fn script_prompt(
    cell: &GenerationCell,
    campaign: &CampaignDescriptor,
    settings: &GenerationSettings,
) -> String {
    format!(
        "Write a {} {} script for {} on {}, describing the visuals scene by scene.\n\nCampaign: {}\nDescription: {}\nTarget audience: {}",
        tone_voice(settings.tone),
        cell.media_type,
        campaign.brand_name(),
        cell.platform,
        campaign.title(),
        campaign.description(),
        campaign.target_audience(),
    )
}
