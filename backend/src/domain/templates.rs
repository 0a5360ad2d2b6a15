//! Fixed message templates for guardian notifications.
//!
//! One template per [`MessageKind`], parameterized only by child and
//! guardian name. Messages are worded in Portuguese for the families
//! the room serves.

use shared::MessageKind;

/// Render the message body for one notification.
pub fn render_message(kind: MessageKind, child_name: &str, guardian_name: &str) -> String {
    match kind {
        MessageKind::Arrival => format!(
            "Paz! *{}* já está na salinha das crianças. Tenha um ótimo culto! 🙏",
            child_name
        ),
        MessageKind::Bathroom => format!(
            "Paz do Senhor {}, o(a) {} precisa ir ao banheiro. Pode nos auxiliar?",
            guardian_name, child_name
        ),
        MessageKind::Distress => format!(
            "Paz do Senhor {}, o(a) {} está sentindo sua falta. Poderia vir dar um abraço nele(a)?",
            guardian_name, child_name
        ),
        MessageKind::UrgentCall => format!(
            "Paz do Senhor {}, solicitamos sua presença na salinha das crianças para auxiliar o(a) {}.",
            guardian_name, child_name
        ),
    }
}
