use crate::utils::*;
use pokematch_core as game;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameInfoProps {
    pub attempts: u8,
    pub max_attempts: u8,
    pub matched: game::PairCount,
    pub total_pairs: game::PairCount,
    pub progress: f32,
    pub time: game::Seconds,
}

#[function_component(GameInfo)]
pub(crate) fn game_info(props: &GameInfoProps) -> Html {
    let GameInfoProps {
        attempts,
        max_attempts,
        matched,
        total_pairs,
        progress,
        time,
    } = props.clone();

    let bar_style = format!("width: {}%", progress);

    html! {
        <nav class="info">
            <div class="progress">
                <div class="bar" style={bar_style}/>
            </div>
            <dl>
                <dt>{"Matched"}</dt>
                <dd>{format!("{} / {}", matched, total_pairs)}</dd>
                <dt>{"Attempts"}</dt>
                <dd>{format!("{} / {}", attempts, max_attempts)}</dd>
                <dt>{"Time"}</dt>
                <dd>{format_time(time)}</dd>
            </dl>
        </nav>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameCompletedProps {
    pub result: game::GameResult,
    pub score: u32,
    pub high_score: u32,
    pub attempts: u8,
    pub max_attempts: u8,
    pub multiplier: u32,
    pub time: game::Seconds,
    pub on_new_game: Callback<MouseEvent>,
}

#[function_component(GameCompleted)]
pub(crate) fn game_completed(props: &GameCompletedProps) -> Html {
    let GameCompletedProps {
        result,
        score,
        high_score,
        attempts,
        max_attempts,
        multiplier,
        time,
        on_new_game,
    } = props.clone();

    let class = classes!(
        "completed",
        match result {
            game::GameResult::Won => "won",
            game::GameResult::Lost => "lost",
        }
    );

    html! {
        <dialog {class} open={true}>
            <article>
                <h2>{result.message()}</h2>
                <dl>
                    <dt>{"Score"}</dt>
                    <dd>{score}</dd>
                    <dt>{"High score"}</dt>
                    <dd>{high_score}</dd>
                    <dt>{"Attempts left"}</dt>
                    <dd>{format!("{} / {}", attempts, max_attempts)}</dd>
                    <dt>{"Multiplier"}</dt>
                    <dd>{format!("{}x", multiplier)}</dd>
                    <dt>{"Time"}</dt>
                    <dd>{format_time(time)}</dd>
                </dl>
                <footer>
                    <button onclick={on_new_game}>{"New Game"}</button>
                </footer>
            </article>
        </dialog>
    }
}
