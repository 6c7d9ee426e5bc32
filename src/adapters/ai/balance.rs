use crate::adapters::ai::json::parse_completion;
use crate::domain::model::{BalanceSuggestion, Group};
use crate::domain::ports::TextService;
use crate::utils::error::{Result, SpinnerError};

pub const DEFAULT_BALANCE_CRITERIA: &str =
    "Make balanced groups of equal size with diverse members";

pub fn balance_prompt(names: &[String], groups: &[Group], criteria: &str) -> String {
    let mut prompt = String::from("Rebalance these groups fairly.\n\n");
    prompt.push_str(&format!("Participants: {}\n\nCurrent groups:\n", names.join(", ")));
    for (index, group) in groups.iter().enumerate() {
        prompt.push_str(&format!("Group {}: {}\n", index + 1, group.members.join(", ")));
    }
    if !criteria.trim().is_empty() {
        prompt.push_str(&format!("\nBalance criteria: {}\n", criteria));
    }
    prompt.push_str(
        "\nReturn ONLY JSON shaped like \
         {\"suggestion\": \"short explanation\", \"groups\": [[\"name1\", \"name2\"]]}",
    );
    prompt
}

pub async fn request_balance(
    service: &dyn TextService,
    names: &[String],
    groups: &[Group],
    criteria: &str,
) -> Result<BalanceSuggestion> {
    if names.is_empty() || groups.is_empty() {
        return Err(SpinnerError::NoParticipantsError);
    }

    tracing::info!(
        "Balancing {} groups with {}",
        groups.len(),
        service.provider_name().to_uppercase()
    );
    let completion = service
        .complete(&balance_prompt(names, groups, criteria))
        .await?;
    if completion.trim().is_empty() {
        return Err(SpinnerError::AiResponseError {
            message: "the AI returned an empty response".to_string(),
        });
    }

    // 平衡結果沒有後備方案, 解析失敗就回報錯誤
    parse_completion(&completion)
}
