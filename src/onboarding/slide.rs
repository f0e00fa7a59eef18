use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub description: String,
    /// Emoji or icon resource name.
    pub icon: String,
    pub background_image: Option<String>,
}

impl Slide {
    fn new(title: &str, description: &str, icon: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            background_image: None,
        }
    }
}

/// The built-in onboarding deck.
pub fn default_slides() -> Vec<Slide> {
    vec![
        Slide::new(
            "Mission",
            "Bringing hope and faith to our community through love, service, and the \
             message of Jesus Christ.",
            "🎯",
        ),
        Slide::new(
            "Vision",
            "To be a beacon of light in our city, transforming lives and building a \
             stronger, more connected community.",
            "🌟",
        ),
        Slide::new(
            "How to Engage",
            "Join us in worship, connect with ministries, give back to causes, and grow \
             in your faith journey.",
            "🤝",
        ),
    ]
}
