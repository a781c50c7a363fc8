/// Legal documents reachable from the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalDocument {
    Privacy,
    Terms,
}

impl LegalDocument {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Privacy => "Privacy Policy",
            Self::Terms => "Terms of Service",
        }
    }
}

/// The single modal or tooltip shown over the page, if any.
///
/// Independent of [`WizardState`](super::WizardState): the calculator keeps
/// its progress while an overlay is open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Contact,
    Legal(LegalDocument),
    /// Explanation for the option with this id.
    Tooltip(String),
}

impl Overlay {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Replaces whatever is open with `next`.
    pub fn open(
        &mut self,
        next: Overlay,
    ) {
        *self = next;
    }

    pub fn close(&mut self) {
        *self = Self::None;
    }

    /// Shows the tooltip for `id`, or hides it if it is already showing.
    pub fn toggle_tooltip(
        &mut self,
        id: &str,
    ) {
        match self {
            Self::Tooltip(current) if current == id => self.close(),
            _ => self.open(Self::Tooltip(id.to_string())),
        }
    }
}
