/// Result renderer
///
/// Pure projection of a `RequestState` into the text shown to the user.
/// One card per recommendation, keyed by chatroom id, score rounded to two
/// decimals. An empty list renders nothing for the card section; a set
/// error renders the error text instead.
use crate::models::Recommendation;
use crate::session::RequestState;

fn render_card(recommendation: &Recommendation) -> String {
    format!(
        "Chatroom {} / Score: {:.2}",
        recommendation.chatroom_id, recommendation.predicted_score
    )
}

pub fn render(state: &RequestState) -> String {
    if let Some(error) = &state.error {
        return format!("Error: {}", error);
    }

    state
        .recommendations
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}
