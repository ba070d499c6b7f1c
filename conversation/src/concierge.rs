//! Offline concierge: a keyword-matching responder that stands in for the
//! remote completion provider when no network access is wanted.

use async_trait::async_trait;
use llm::{ChatMessage, ChatModel, ChatRequest, ProviderError, ProviderResult};

use crate::catalog::{CRETACEOUS, DESTINATIONS, Destination, FLORENCE_1504, PARIS_1889};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    Greeting,
    Paris,
    Cretaceous,
    Florence,
    Duration,
    Prices,
    Recommendation,
    Safety,
    Booking,
}

/// Rules are checked in order; the first match wins.
/// Single words match word prefixes, phrases match anywhere in the text.
const RULES: &[(Topic, &[&str])] = &[
    (Topic::Paris, &["paris", "1889", "belle époque", "tour eiffel", "eiffel"]),
    (
        Topic::Cretaceous,
        &["crétacé", "cretace", "dinosaure", "préhistoire", "prehistoire", "rex", "tyrannosaure"],
    ),
    (
        Topic::Florence,
        &["florence", "renaissance", "michel-ange", "italie", "art"],
    ),
    (Topic::Duration, &["durée", "duree", "combien de temps", "jours"]),
    (Topic::Prices, &["prix", "tarif", "coût", "cout", "combien"]),
    (
        Topic::Recommendation,
        &["recommand", "conseill", "choisir", "meilleur", "quel"],
    ),
    (Topic::Safety, &["sécurité", "securite", "sûr", "danger", "risque"]),
    (Topic::Booking, &["réserv", "reserv", "book", "partir", "voyage"]),
];

const GREETINGS: &[&str] = &["bonjour", "salut", "hello", "hi", "hey"];

#[derive(Debug, Clone, Copy, Default)]
pub struct ConciergeModel;

impl ConciergeModel {
    pub fn new() -> Self {
        Self
    }

    /// Canned answer for one user message.
    pub fn reply(&self, message: &str) -> String {
        match classify(message) {
            Some(topic) => answer(topic),
            None => fallback(),
        }
    }
}

#[async_trait]
impl ChatModel for ConciergeModel {
    async fn chat(&self, request: &ChatRequest) -> ProviderResult<ChatMessage> {
        let question = request.last_user_message().ok_or(ProviderError::Empty)?;
        Ok(ChatMessage::assistant(self.reply(&question.content)))
    }
}

fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|w| !w.is_empty())
        .collect()
}

fn classify(message: &str) -> Option<Topic> {
    let text = message.to_lowercase();
    let words = words(&text);

    if words.iter().any(|w| GREETINGS.contains(w)) {
        return Some(Topic::Greeting);
    }

    RULES
        .iter()
        .find(|(_, keywords)| {
            keywords.iter().any(|&keyword| {
                if keyword.contains(' ') {
                    text.contains(keyword)
                } else {
                    words.iter().any(|w| {
                        w.starts_with(keyword) || w.split('-').any(|part| part.starts_with(keyword))
                    })
                }
            })
        })
        .map(|(topic, _)| *topic)
}

fn answer(topic: Topic) -> String {
    match topic {
        Topic::Greeting => "Bonjour ! 👋 Bienvenue chez TimeTravel Agency. Je suis ravi de vous \
            accompagner dans la découverte de nos destinations temporelles. Comment puis-je vous \
            aider aujourd'hui ?"
            .to_string(),
        Topic::Paris => format!(
            "🗼 {} est une destination extraordinaire ! Vous vivrez l'effervescence de \
             l'Exposition Universelle et assisterez à l'inauguration de la Tour Eiffel. \
             Prix: {} pour {}. Points forts: {}. Souhaitez-vous en savoir plus ?",
            PARIS_1889.name,
            PARIS_1889.price_label(),
            PARIS_1889.duration_label(),
            highlights(&PARIS_1889)
        ),
        Topic::Cretaceous => format!(
            "🦕 Le Crétacé est notre destination la plus spectaculaire ! Observez les dinosaures \
             dans leur habitat naturel depuis nos capsules ultra-sécurisées. Prix: {} pour {}. \
             Une expérience unique garantie à 100% !",
            CRETACEOUS.price_label(),
            CRETACEOUS.duration_label()
        ),
        Topic::Florence => format!(
            "🎨 {} vous plongera au cœur de la Renaissance italienne ! Rencontrez Michel-Ange \
             et découvrez les chefs-d'œuvre de l'époque. Prix: {} pour {}. Parfait pour les \
             amateurs d'art et d'histoire !",
            FLORENCE_1504.name,
            FLORENCE_1504.price_label(),
            FLORENCE_1504.duration_label()
        ),
        Topic::Prices => {
            let lines: Vec<String> = DESTINATIONS
                .iter()
                .map(|d| format!("- {}: {}", d.name, d.price_label()))
                .collect();
            format!(
                "💰 Nos tarifs varient selon la destination:\n{}\n\nTous nos voyages incluent \
                 l'accompagnement d'experts, l'hébergement premium et la garantie de retour à 100% !",
                lines.join("\n")
            )
        }
        Topic::Duration => {
            let lines: Vec<String> = DESTINATIONS
                .iter()
                .map(|d| format!("- {}: {}", d.name, d.duration_label()))
                .collect();
            let shortest = DESTINATIONS.iter().map(|d| d.duration_days).min().unwrap_or_default();
            let longest = DESTINATIONS.iter().map(|d| d.duration_days).max().unwrap_or_default();
            format!(
                "⏰ Nos voyages durent entre {} et {} jours selon la destination:\n{}\n\n\
                 Chaque itinéraire est soigneusement optimisé pour une expérience complète !",
                shortest,
                longest,
                lines.join("\n")
            )
        }
        Topic::Recommendation => format!(
            "🤔 Je serais ravi de vous conseiller ! Que recherchez-vous ?\n\
             - Pour l'art et la culture: {}\n\
             - Pour l'élégance et le raffinement: {}\n\
             - Pour l'aventure et la nature: {}\n\n\
             Quel type d'expérience vous attire le plus ?",
            FLORENCE_1504.name, PARIS_1889.name, CRETACEOUS.name
        ),
        Topic::Safety => "🛡️ La sécurité est notre priorité absolue ! Nos capsules temporelles \
            sont certifiées avec un taux de retour de 100%. Nos guides experts vous accompagnent \
            à chaque instant. Technologie de pointe garantissant précision et protection maximale."
            .to_string(),
        Topic::Booking => "📅 Excellent ! Pour réserver, vous pouvez utiliser notre formulaire de \
            réservation sur cette page. Notre équipe vous contactera sous 24h pour finaliser votre \
            voyage temporel. Des questions sur une destination en particulier ?"
            .to_string(),
    }
}

fn highlights(destination: &Destination) -> String {
    destination.highlights.iter().take(3).copied().collect::<Vec<_>>().join(", ")
}

fn fallback() -> String {
    let names: Vec<&str> = DESTINATIONS.iter().map(|d| d.name).collect();
    format!(
        "Je suis là pour vous aider à choisir votre destination temporelle idéale ! \
         Je peux vous renseigner sur:\n\
         - Nos {} destinations ({})\n\
         - Les prix et durées de voyage\n\
         - La sécurité de nos voyages\n\
         - Des recommandations personnalisées\n\n\
         Que souhaitez-vous savoir ?",
        names.len(),
        names.join(", ")
    )
}
