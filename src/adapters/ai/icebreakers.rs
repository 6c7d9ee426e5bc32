use crate::adapters::ai::json::parse_completion;
use crate::domain::model::{Group, Icebreaker};
use crate::domain::ports::TextService;
use crate::utils::error::{Result, SpinnerError};
use serde::Deserialize;

pub const FALLBACK_ICEBREAKERS: [&str; 8] = [
    "Tell us one interesting thing about yourself that few people know.",
    "If you could have one superpower, what would it be and why?",
    "What is the best thing that happened to you this week?",
    "If you could travel anywhere, where would you go?",
    "What skill would you like to learn and why?",
    "What is your favourite way to relax after a long day?",
    "If you could meet any historical figure, who would you choose?",
    "What is the most interesting place you have ever visited?",
];

#[derive(Deserialize)]
struct IcebreakerEnvelope {
    icebreakers: Vec<Icebreaker>,
}

pub fn icebreaker_prompt(group_count: usize, context: Option<&str>) -> String {
    let mut prompt = format!(
        "I need {} icebreaker questions for {} groups. ",
        group_count, group_count
    );
    if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
        prompt.push_str(&format!("The context is: {}. ", context));
    }
    prompt.push_str(
        "Write one unique, friendly team-building question per group. \
         Return ONLY JSON shaped like \
         {\"icebreakers\": [{\"groupIndex\": 0, \"question\": \"...\"}]}",
    );
    prompt
}

pub fn fallback_icebreakers(group_count: usize) -> Vec<Icebreaker> {
    (0..group_count)
        .map(|index| Icebreaker {
            group_index: index,
            question: FALLBACK_ICEBREAKERS[index % FALLBACK_ICEBREAKERS.len()].to_string(),
        })
        .collect()
}

/// Parses `{"icebreakers": [...]}`, dropping entries for unknown groups.
pub fn parse_icebreakers(completion: &str, group_count: usize) -> Vec<Icebreaker> {
    match parse_completion::<IcebreakerEnvelope>(completion) {
        Ok(envelope) => envelope
            .icebreakers
            .into_iter()
            .filter(|item| item.group_index < group_count)
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to parse icebreakers, using fallback questions: {}", e);
            fallback_icebreakers(group_count)
        }
    }
}

pub async fn generate_icebreakers(
    service: &dyn TextService,
    groups: &[Group],
    context: Option<&str>,
) -> Result<Vec<Icebreaker>> {
    if groups.is_empty() {
        return Err(SpinnerError::NoParticipantsError);
    }

    tracing::info!(
        "Generating icebreakers with {}",
        service.provider_name().to_uppercase()
    );
    let completion = service
        .complete(&icebreaker_prompt(groups.len(), context))
        .await?;
    if completion.trim().is_empty() {
        return Err(SpinnerError::AiResponseError {
            message: "the AI returned an empty response".to_string(),
        });
    }

    Ok(parse_icebreakers(&completion, groups.len()))
}
