//! Canned replies used when the assistant is unavailable.

use fiq_core::dialog::{DialogProgress, DialogTurn};
use fiq_core::enums::MessageIntent;

/// Scenario help for Variant A chat, chosen by keyword.
#[must_use]
pub fn chat_fallback(message: &str) -> String {
    let lower = message.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|word| lower.contains(word));

    let reply = if mentions(&["gebäude", "fassade"]) {
        "Basierend auf Ihrem Szenario: Sie planen eine WDVS-Sanierung der \
         **Eingangsfassade zur Straße (Südseite)** mit 140mm Mineralwolle-Dämmung.\n\n\
         Das Gebäude ist ein Mehrfamilienhaus aus **Baujahr 1965** mit \
         Rotklinkerfassade und 10 Wohneinheiten."
    } else if mentions(&["dämmung", "material"]) {
        "Für Ihr Vorhaben ist **140mm Mineralwolle-Dämmung** vorgesehen. Dies ist \
         eine bewährte Lösung für WDVS-Sanierungen und bietet gute Dämmeigenschaften."
    } else if mentions(&["heizung", "energie"]) {
        "Das Gebäude hat eine **Ölheizung im Keller**. Nach der Fassadensanierung \
         könnten Sie über eine Heizungsmodernisierung nachdenken, um die \
         Energieeffizienz weiter zu steigern."
    } else if mentions(&["miete", "mieterin"]) {
        "Sie müssen für die **Mieterin im EG rechts (57,5m²)** die mögliche \
         Mieterhöhung nach der energetischen Sanierung berechnen."
    } else if mentions(&["kosten", "preis"]) {
        "Die Kosten für eine WDVS-Sanierung hängen von verschiedenen Faktoren ab. \
         Bei Ihrem Vorhaben (140mm Mineralwolle, Eingangsfassade) können Sie mit \
         etwa 150-200€ pro m² rechnen."
    } else {
        "Ich helfe Ihnen gerne bei Fragen zur Gebäude-Energieberatung!\n\n\
         **Ihr Szenario:** Mehrfamilienhaus (Baujahr 1965), WDVS-Sanierung der \
         Eingangsfassade mit 140mm Mineralwolle.\n\n\
         Fragen Sie mich zu: Dämmung, Kosten, Mieterhöhung oder technischen Details."
    };
    reply.to_string()
}

/// Reply for a dialog turn when the assistant cannot produce one.
#[must_use]
pub fn dialog_fallback(turn: &DialogTurn, progress: DialogProgress) -> String {
    if turn.after_completion {
        return "Der Dialog ist bereits abgeschlossen. Sie können Ihre Antworten jetzt \
                speichern."
            .to_string();
    }

    match turn.intent {
        MessageIntent::FollowUp => format!(
            "Zur Frage „{}“: Orientieren Sie sich an Ihrem Szenario. Sie können \
             weitere Rückfragen stellen oder mit „weiter“ fortfahren.",
            turn.question.question
        ),
        MessageIntent::Answer => match &turn.next_question {
            Some(next) => format!(
                "Danke, ich habe Ihre Antwort notiert.\n\nFrage {}/{}: {}",
                progress.current, progress.total, next.question
            ),
            None => "Vielen Dank! Alle Fragen sind beantwortet. Die Beratung ist \
                     abgeschlossen und kann jetzt gespeichert werden."
                .to_string(),
        },
        MessageIntent::Unclear => format!(
            "Ist das bereits Ihre Antwort auf „{}“ oder eine Rückfrage? Schreiben \
             Sie „weiter“, wenn ich die Antwort übernehmen soll.",
            turn.question.question
        ),
    }
}

/// Greeting sent when a dialog starts.
#[must_use]
pub fn welcome_message(question_count: usize) -> String {
    format!("Hallo! Ich führe Sie durch {question_count} Fragen zur Gebäude-Energieberatung.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiq_core::dialog::DialogSession;
    use rstest::rstest;

    #[rstest]
    #[case("Welche Fassade ist gemeint?", "Südseite")]
    #[case("Welches Material?", "Mineralwolle")]
    #[case("Wie wird geheizt? Energie?", "Ölheizung")]
    #[case("Was ist mit der Miete?", "Mieterin")]
    #[case("Was kosten die Arbeiten?", "150-200€")]
    #[case("Hallo", "Gebäude-Energieberatung")]
    fn chat_fallback_picks_topic(#[case] message: &str, #[case] needle: &str) {
        assert!(chat_fallback(message).contains(needle));
    }

    #[test]
    fn answer_fallback_asks_next_question() {
        let mut session = DialogSession::standard("dlg-00000001").unwrap();
        let turn = session.submit("1965");
        let reply = dialog_fallback(&turn, session.progress());
        assert!(reply.starts_with("Danke"));
        assert!(reply.contains("Frage 2/6"));
    }

    #[test]
    fn unclear_fallback_repeats_current_question() {
        let mut session = DialogSession::standard("dlg-00000001").unwrap();
        let turn = session.submit("Die Fassade an der Straße");
        let reply = dialog_fallback(&turn, session.progress());
        assert!(reply.contains(&session.current_question().question));
    }

    #[test]
    fn welcome_counts_questions() {
        assert_eq!(
            welcome_message(6),
            "Hallo! Ich führe Sie durch 6 Fragen zur Gebäude-Energieberatung."
        );
    }
}
