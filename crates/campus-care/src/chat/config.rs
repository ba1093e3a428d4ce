use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::domain::ChatCategory;
use crate::triage::RiskLevel;

const GREETING_PATTERN: &str = r"^(hi|hello|hey|good morning|good afternoon|good evening)";

static GREETING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(GREETING_PATTERN).expect("valid greeting regex"));

const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end it all",
    "die",
    "hurt myself",
    "self-harm",
    "cutting",
    "overdose",
    "worthless",
    "hopeless",
    "give up",
];

const ANXIETY_KEYWORDS: &[&str] = &[
    "anxious",
    "anxiety",
    "worried",
    "panic",
    "nervous",
    "scared",
    "fear",
    "overwhelmed",
    "racing thoughts",
    "can't breathe",
];

const DEPRESSION_KEYWORDS: &[&str] = &[
    "depressed",
    "depression",
    "sad",
    "lonely",
    "empty",
    "numb",
    "hopeless",
    "tired",
    "exhausted",
    "worthless",
    "guilty",
];

const STRESS_KEYWORDS: &[&str] = &[
    "stressed",
    "stress",
    "pressure",
    "overwhelmed",
    "busy",
    "exhausted",
    "deadline",
    "exam",
    "work",
    "academic",
];

const POSITIVE_KEYWORDS: &[&str] = &[
    "good",
    "great",
    "happy",
    "better",
    "improving",
    "positive",
    "grateful",
    "thankful",
    "excited",
    "proud",
];

const REPLIES: &[(ChatCategory, &[&str])] = &[
    (
        ChatCategory::Greeting,
        &[
            "Hello! I'm here to support you. How are you feeling today?",
            "Hi there! What's on your mind?",
            "Welcome! I'm glad you reached out. How can I help you?",
        ],
    ),
    (
        ChatCategory::Anxiety,
        &[
            "I understand you're feeling anxious. Try the 4-7-8 breathing technique: breathe in for 4, hold for 7, exhale for 8.",
            "Anxiety can be overwhelming. Let's ground yourself: name 5 things you can see, 4 you can touch, 3 you can hear.",
            "It's okay to feel anxious. Would you like to try a quick mindfulness exercise?",
        ],
    ),
    (
        ChatCategory::Depression,
        &[
            "I hear that you're struggling. Your feelings are valid, and seeking help shows strength.",
            "Depression can make everything feel difficult. Have you been able to do any small self-care activities today?",
            "Thank you for sharing this with me. Would it help to talk about what's been weighing on you?",
        ],
    ),
    (
        ChatCategory::Stress,
        &[
            "Stress can be really challenging. Let's work on breaking it down into manageable pieces.",
            "I understand you're feeling stressed. What's the most pressing thing you're dealing with right now?",
            "Stress affects us all differently. Have you tried any stress-relief techniques that have helped before?",
        ],
    ),
    (
        ChatCategory::Crisis,
        &[
            "I'm concerned about what you're sharing. Please reach out to a counselor immediately at +91-123-456-7890 or emergency services at 112.",
            "Your safety is the most important thing right now. Please contact the crisis helpline at +91-987-654-3210 immediately.",
            "This sounds very serious. Please don't hesitate to call emergency services at 112 or contact a trusted person right away.",
        ],
    ),
    (
        ChatCategory::Positive,
        &[
            "I'm glad to hear you're doing well! What's been helping you feel positive?",
            "That's wonderful to hear! Keep up the good work with your mental health.",
            "It sounds like you're in a good place. Is there anything specific that's been working well for you?",
        ],
    ),
    (
        ChatCategory::General,
        &[
            "I'm here to listen. Can you tell me more about what you're experiencing?",
            "Thank you for sharing that with me. How has this been affecting your daily life?",
            "I appreciate you opening up. What kind of support would be most helpful right now?",
        ],
    ),
];

// Greeting and positive have no list of their own and use the general one.
const SUGGESTIONS: &[(ChatCategory, &[&str])] = &[
    (
        ChatCategory::Anxiety,
        &[
            "Try deep breathing exercises",
            "Practice grounding techniques",
            "Consider talking to a counselor",
            "Explore relaxation resources",
        ],
    ),
    (
        ChatCategory::Depression,
        &[
            "Reach out to support network",
            "Consider professional help",
            "Engage in self-care activities",
            "Join support groups",
        ],
    ),
    (
        ChatCategory::Stress,
        &[
            "Break tasks into smaller steps",
            "Practice time management",
            "Try stress-relief techniques",
            "Talk to someone you trust",
        ],
    ),
    (
        ChatCategory::Crisis,
        &[
            "Contact emergency services: 112",
            "Call crisis helpline: +91-987-654-3210",
            "Reach out to a trusted person",
            "Go to nearest hospital",
        ],
    ),
    (
        ChatCategory::General,
        &[
            "Explore mental health resources",
            "Consider booking an appointment",
            "Join our community forum",
            "Try self-assessment tools",
        ],
    ),
];

/// Keyword set that maps a message onto a category when any keyword occurs in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub category: ChatCategory,
    pub risk_level: RiskLevel,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    fn new(category: ChatCategory, risk_level: RiskLevel, keywords: &[&str]) -> Self {
        Self {
            category,
            risk_level,
            keywords: keywords.iter().map(|kw| kw.to_lowercase()).collect(),
        }
    }

    /// `lowered` must already be lowercase.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|kw| lowered.contains(kw.as_str()))
    }
}

/// Immutable tables driving the support-chat classifier.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    rules: Vec<KeywordRule>,
    greeting: Regex,
    replies: BTreeMap<ChatCategory, Vec<String>>,
    suggestions: BTreeMap<ChatCategory, Vec<String>>,
}

impl ClassifierConfig {
    /// The campus tables. Rule order is the precedence order: crisis first.
    pub fn standard() -> Self {
        let rules = vec![
            KeywordRule::new(ChatCategory::Crisis, RiskLevel::High, CRISIS_KEYWORDS),
            KeywordRule::new(ChatCategory::Anxiety, RiskLevel::Medium, ANXIETY_KEYWORDS),
            KeywordRule::new(ChatCategory::Depression, RiskLevel::Medium, DEPRESSION_KEYWORDS),
            KeywordRule::new(ChatCategory::Stress, RiskLevel::Low, STRESS_KEYWORDS),
            KeywordRule::new(ChatCategory::Positive, RiskLevel::Low, POSITIVE_KEYWORDS),
        ];

        Self {
            rules,
            greeting: GREETING.clone(),
            replies: to_table(REPLIES),
            suggestions: to_table(SUGGESTIONS),
        }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn greeting(&self) -> &Regex {
        &self.greeting
    }

    /// Reply pool for a category; categories without a pool use the general one.
    pub fn replies(&self, category: ChatCategory) -> &[String] {
        self.replies
            .get(&category)
            .or_else(|| self.replies.get(&ChatCategory::General))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Suggested next steps; categories without a list use the general one.
    pub fn suggestions(&self, category: ChatCategory) -> &[String] {
        self.suggestions
            .get(&category)
            .or_else(|| self.suggestions.get(&ChatCategory::General))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn with_replies(mut self, category: ChatCategory, replies: Vec<String>) -> Self {
        self.replies.insert(category, replies);
        self
    }

    pub fn with_suggestions(mut self, category: ChatCategory, suggestions: Vec<String>) -> Self {
        self.suggestions.insert(category, suggestions);
        self
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn to_table(entries: &[(ChatCategory, &[&str])]) -> BTreeMap<ChatCategory, Vec<String>> {
    entries
        .iter()
        .map(|(category, lines)| (*category, lines.iter().map(|line| line.to_string()).collect()))
        .collect()
}
