use hometab_application::ValidationError;

/// Maps save-boundary rejections to the messages shown to the user.
pub struct ErrorPresenter;

impl ErrorPresenter {
    pub fn user_message(error: &ValidationError) -> String {
        match error {
            ValidationError::MissingDescription => {
                "Please enter an expense description.".to_string()
            }
            ValidationError::MissingPayer => "Please select who paid.".to_string(),
            ValidationError::MissingDate => "Please select a date.".to_string(),
            ValidationError::InvalidAmount => "Please enter a valid amount.".to_string(),
            ValidationError::NoParticipants => {
                "Please select at least one participant.".to_string()
            }
            ValidationError::PercentagesNotHundred { .. } => {
                "Percentages must sum to 100%.".to_string()
            }
            ValidationError::NoItems => "Please add at least one item.".to_string(),
            ValidationError::ItemMissingName => "Each item must have a name.".to_string(),
            ValidationError::ItemInvalidCost { name } => {
                format!("Item \"{name}\" must have a valid cost.")
            }
            ValidationError::ItemNoParticipants { name } => {
                format!("Item \"{name}\" must have at least one participant.")
            }
            ValidationError::IncompletePayment => {
                "A payment needs a payer, a recipient, and an amount.".to_string()
            }
            ValidationError::MissingRoommateName => "Please enter a roommate name.".to_string(),
            ValidationError::MissingChoreName => {
                "Please enter a chore name before submitting!".to_string()
            }
            ValidationError::MissingItemName => "Item name cannot be empty".to_string(),
            ValidationError::MissingFridgeItemName => {
                "Please enter a fridge item name.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::percentages(
        ValidationError::PercentagesNotHundred { total: 90.0 },
        "Percentages must sum to 100%."
    )]
    #[case::item_cost(
        ValidationError::ItemInvalidCost { name: "pasta".to_string() },
        "Item \"pasta\" must have a valid cost."
    )]
    #[case::payment(
        ValidationError::IncompletePayment,
        "A payment needs a payer, a recipient, and an amount."
    )]
    fn user_messages(#[case] error: ValidationError, #[case] expected: &str) {
        assert_eq!(ErrorPresenter::user_message(&error), expected);
    }
}
