use std::fmt;

/// The five calculator steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WizardStep {
    #[default]
    ProjectType,
    Complexity,
    AddOns,
    Delivery,
    PaymentAndContact,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        Self::ProjectType,
        Self::Complexity,
        Self::AddOns,
        Self::Delivery,
        Self::PaymentAndContact,
    ];

    /// One-based position, as shown in the progress indicator.
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ProjectType => "Project Type",
            Self::Complexity => "Complexity",
            Self::AddOns => "Power-ups",
            Self::Delivery => "Delivery Timeline",
            Self::PaymentAndContact => "Payment & Details",
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::ALL.get(self.number()).copied()
    }

    pub fn previous(&self) -> Option<Self> {
        (*self as usize).checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn is_last(&self) -> bool {
        *self == Self::PaymentAndContact
    }
}

impl fmt::Display for WizardStep {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "step {} ({})", self.number(), self.title())
    }
}

/// Where the estimate flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    Editing(WizardStep),
    /// The estimate has been handed to the lead service; edits are locked.
    Submitting,
    Submitted,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::Editing(WizardStep::default())
    }
}

impl WizardState {
    pub fn step(&self) -> Option<WizardStep> {
        match self {
            Self::Editing(step) => Some(*step),
            Self::Submitting | Self::Submitted => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn steps_walk_forward_and_back() {
        assert_eq!(WizardStep::ProjectType.next(), Some(WizardStep::Complexity));
        assert_eq!(WizardStep::PaymentAndContact.next(), None);
        assert_eq!(WizardStep::ProjectType.previous(), None);
        assert_eq!(WizardStep::Delivery.previous(), Some(WizardStep::AddOns));
    }

    #[test]
    fn step_numbers_are_one_based() {
        let numbers: Vec<usize> = WizardStep::ALL.iter().map(WizardStep::number).collect();

        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(WizardStep::AddOns.to_string(), "step 3 (Power-ups)");
    }

    #[test]
    fn only_editing_state_has_a_step() {
        assert_eq!(WizardState::default().step(), Some(WizardStep::ProjectType));
        assert_eq!(WizardState::Submitting.step(), None);
        assert!(!WizardState::Submitted.is_editing());
    }
}
