//! Persona grounding sent once at the start of a session.

use crate::catalog::{DESTINATIONS, Destination};
use llm::ChatMessage;

/// Greeting seeded as the first assistant turn of every session.
pub const GREETING: &str = "Bonjour ! Je suis votre assistant TimeTravel. \
Comment puis-je vous aider à planifier votre voyage temporel ?";

const ACKNOWLEDGEMENT: &str = "Compris ! Je suis l'assistant TimeTravel Agency. \
Je suis prêt à vous aider avec vos questions sur nos destinations temporelles. \
Comment puis-je vous assister aujourd'hui ?";

/// Synthetic instruction + acknowledgement pair prepended to the first
/// provider call of a session.
///
/// The instruction travels as a `user` turn rather than a `system` turn so
/// that providers without system-role support accept it unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaPrimer {
    instruction: String,
    acknowledgement: String,
}

impl PersonaPrimer {
    pub fn new(instruction: impl Into<String>, acknowledgement: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            acknowledgement: acknowledgement.into(),
        }
    }

    /// The TimeTravel Agency concierge persona, with the catalog inlined.
    pub fn agency() -> Self {
        Self::new(agency_instruction(&DESTINATIONS), ACKNOWLEDGEMENT)
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn acknowledgement(&self) -> &str {
        &self.acknowledgement
    }

    pub fn messages(&self) -> [ChatMessage; 2] {
        [
            ChatMessage::user(self.instruction.clone()),
            ChatMessage::assistant(self.acknowledgement.clone()),
        ]
    }
}

impl Default for PersonaPrimer {
    fn default() -> Self {
        Self::agency()
    }
}

fn agency_instruction(destinations: &[Destination]) -> String {
    let mut prompt = String::from(
        "Tu es l'assistant virtuel de TimeTravel Agency, une agence de voyage temporel de luxe premium.\n\n\
         Caractéristiques de ta personnalité:\n\
         - Ton professionnel mais chaleureux\n\
         - Passionné d'histoire et de voyages\n\
         - Enthousiaste sans être trop familier\n\
         - Toujours courtois et bienveillant\n\
         - Expert en expériences temporelles\n\n\
         Destinations disponibles:\n",
    );

    for (index, destination) in destinations.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. {} ({} - {})\n",
            index + 1,
            destination.title(),
            destination.price_label(),
            destination.duration_label()
        ));
        for highlight in destination.highlights {
            prompt.push_str(&format!("   - {}\n", highlight));
        }
        prompt.push('\n');
    }

    prompt.push_str(
        "Informations importantes:\n\
         - Tous les voyages incluent accompagnement d'experts, hébergement premium\n\
         - Garantie de retour à 100%\n\
         - Sécurité certifiée avec technologie de pointe\n\
         - Assurance voyage complète incluse\n\n\
         Ton rôle:\n\
         - Aider les clients à choisir leur destination\n\
         - Répondre aux questions sur les détails des voyages\n\
         - Recommander basé sur les intérêts du client\n\
         - Rassurer sur la sécurité\n\
         - Diriger vers la réservation quand approprié\n\
         - Partager des anecdotes intéressantes sur les périodes historiques\n\n\
         Conseil: Sois naturel, engage une véritable conversation, pose des questions \
         pour mieux comprendre les envies du client.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm::Role;

    #[test]
    fn test_agency_instruction_lists_every_destination() {
        let primer = PersonaPrimer::agency();
        assert!(primer.instruction().contains("1. Paris 1889 - La Belle Époque (12,500€ - 7 jours)"));
        assert!(primer.instruction().contains("2. Crétacé -65M"));
        assert!(primer.instruction().contains("3. Florence 1504 - Renaissance Italienne (15,800€ - 6 jours)"));
        assert!(primer.instruction().contains("   - Rencontre avec Michel-Ange"));
    }

    #[test]
    fn test_primer_messages_are_instruction_then_acknowledgement() {
        let [instruction, ack] = PersonaPrimer::new("be nice", "ok").messages();
        assert_eq!(instruction.role, Role::User);
        assert_eq!(instruction.content, "be nice");
        assert_eq!(ack.role, Role::Assistant);
        assert_eq!(ack.content, "ok");
    }
}
