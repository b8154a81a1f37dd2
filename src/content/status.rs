/// Badge style for a free-form project status such as "In Development".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Concept,
    Planning,
    Development,
    Testing,
    Completed,
    Paused,
    Cancelled,
}

impl StatusClass {
    // checked in this order; the first keyword contained in the status wins
    const ALL: [StatusClass; 7] = [
        StatusClass::Concept,
        StatusClass::Planning,
        StatusClass::Development,
        StatusClass::Testing,
        StatusClass::Completed,
        StatusClass::Paused,
        StatusClass::Cancelled,
    ];

    pub fn from_status(status: &str) -> Option<Self> {
        let status = status.to_lowercase();
        Self::ALL.into_iter().find(|class| status.contains(class.css_class()))
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusClass::Concept => "concept",
            StatusClass::Planning => "planning",
            StatusClass::Development => "development",
            StatusClass::Testing => "testing",
            StatusClass::Completed => "completed",
            StatusClass::Paused => "paused",
            StatusClass::Cancelled => "cancelled",
        }
    }
}
