use crate::board::{GameBoard, RevealTimer};
use crate::info::{GameCompleted, GameInfo};
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::{Interval, Timeout};
use pokematch_core as game;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Dealt { generation: u32, deck: game::Deck },
    Flip(game::CardId),
    Tick,
    RevealMismatch(u32),
    NewGame,
}

fn card_classes(card: &game::Card) -> Vec<&'static str> {
    let mut class = vec!["card"];
    if card.is_face_up() {
        class.push("flipped");
    }
    if card.guessed {
        class.push("guessed");
    }
    class
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    card: game::Card,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CardId>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        card,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(card_classes(&card));
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", card.id);
        if !card.is_face_up() {
            callback.emit(card.id);
        }
    });

    html! {
        <div {class} {onclick}>
            <div class="back"/>
            <div class="front">
                if card.is_face_up() {
                    <img src={card.face.image_path()} alt={card.face.name()}/>
                }
            </div>
        </div>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Starting number of attempts
    #[arg(short, long)]
    attempts: Option<u8>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    board: GameBoard,
    tick_interval: Option<Interval>,
    reveal_timeout: Option<(RevealTimer, Timeout)>,
}

impl GameView {
    const LOGO: &'static str = "assets/pokemon-logo.svg";

    fn request_deal(&self, ctx: &Context<Self>) {
        let request = self.board.deal_request(js_random_seed);
        log::debug!(
            "requesting deal for round {} (seed {})",
            request.generation,
            request.seed
        );

        let generation = request.generation;
        ctx.link().send_future(async move {
            Msg::Dealt {
                generation,
                deck: request.deal(),
            }
        });
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(1000, move || link.send_message(Msg::Tick))
    }

    fn create_reveal(ctx: &Context<Self>, timer: RevealTimer) -> Timeout {
        let link = ctx.link().clone();
        let generation = timer.lockout.generation;
        Timeout::new(timer.delay_ms, move || {
            link.send_message(Msg::RevealMismatch(generation))
        })
    }

    /// Arms or drops timers so they match what the board currently needs.
    fn sync_timers(&mut self, ctx: &Context<Self>) {
        let plan = self.board.timer_plan();

        match (plan.tick, self.tick_interval.is_some()) {
            (true, false) => self.tick_interval = Some(GameView::create_timer(ctx)),
            (false, true) => {
                self.tick_interval.take();
            }
            _ => {}
        }

        let armed = self.reveal_timeout.as_ref().map(|(timer, _)| *timer);
        if plan.reveal != armed {
            self.reveal_timeout = plan
                .reveal
                .map(|timer| (timer, GameView::create_reveal(ctx, timer)));
        }
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let session = self.board.session();
        let Some(round) = session.round() else {
            return html! { <p class="loading">{"Dealing cards..."}</p> };
        };

        let locked = round.is_locked() || session.is_completed();
        html! {
            <section class="board">
                {
                    for round.deck().iter().map(|&card| {
                        let callback = ctx.link().callback(Msg::Flip);
                        html! {
                            <CardView key={card.id} {card} {locked} {callback}/>
                        }
                    })
                }
            </section>
        }
    }

    fn view_completed(&self, ctx: &Context<Self>) -> Html {
        let session = self.board.session();
        let (Some(result), Some(round)) = (session.result(), session.round()) else {
            return html! {};
        };

        let on_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        html! {
            <Modal>
                <GameCompleted
                    {result}
                    score={round.score()}
                    high_score={session.high_score()}
                    attempts={round.attempts_rounded()}
                    max_attempts={round.max_attempts()}
                    multiplier={round.multiplier()}
                    time={round.timer()}
                    {on_new_game}
                />
            </Modal>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let config = props
            .attempts
            .map_or_else(game::GameConfig::default, game::GameConfig::new);

        let view = Self {
            board: GameBoard::new(config, props.seed),
            tick_interval: None,
            reveal_timeout: None,
        };
        view.request_deal(ctx);
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            Dealt { generation, deck } => self.board.accept_deal(generation, deck),
            Flip(id) => self.board.flip(id),
            Tick => self.board.tick(),
            RevealMismatch(generation) => self.board.reveal(generation),
            NewGame => {
                let updated = self.board.new_game();
                if updated {
                    self.request_deal(ctx);
                }
                updated
            }
        };

        self.sync_timers(ctx);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let session = self.board.session();
        let round = session.round();
        let max_attempts = session.config().max_attempts;

        html! {
            <div class="pokematch">
                <header>
                    <img class="logo" src={GameView::LOGO} alt="Pokémon Memory"/>
                    <GameInfo
                        attempts={round.map_or(max_attempts, |round| round.attempts_rounded())}
                        {max_attempts}
                        matched={round.map_or(0, |round| round.matched())}
                        total_pairs={round.map_or(game::CardFace::ALL.len() as game::PairCount, |round| round.total_pairs())}
                        progress={round.map_or(0.0, |round| round.progress_percent())}
                        time={round.map_or(0, |round| round.timer())}
                    />
                </header>
                { self.view_completed(ctx) }
                { self.view_board(ctx) }
            </div>
        }
    }
}
