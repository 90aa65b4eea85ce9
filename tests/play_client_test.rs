//! End-to-end tests of the terminal client against a live local server.

use chrono::{DateTime, NaiveDate};
use gridle::{
    Driver, FixedClock, Flow, GameClient, GameServer, GuessReply, Hint, Input, MemoryStore,
    PlayLoop, PlayerService, RecordStore, Roster, SESSION_KEY, SessionStatus, StaticRoster,
    UNAVAILABLE_ANSWER, board_header, hint_row, judge_guess,
};

fn driver(name: &str, flag: &str, teams: &[&str], car_number: u32, age: u32, first_year: u32, wins: u32) -> Driver {
    Driver::new(
        name.to_string(),
        flag.to_string(),
        teams.iter().map(|t| t.to_string()).collect(),
        car_number,
        age,
        first_year,
        wins,
    )
}

fn roster() -> Roster {
    Roster::new(vec![
        driver("Lewis Hamilton", "gb", &["McLaren", "Mercedes", "Ferrari"], 44, 40, 2007, 105),
        driver("Max Verstappen", "nl", &["Toro Rosso", "Red Bull"], 1, 27, 2015, 63),
        driver("Kimi Räikkönen", "fi", &["Sauber", "McLaren", "Ferrari", "Lotus", "Ferrari", "Alfa Romeo"], 7, 45, 2001, 21),
    ])
}

/// Spawns a server pinned to 2025-02-01 (target "Max Verstappen") and
/// returns its base URL.
async fn spawn_server(reveal_answer: bool) -> String {
    let day = NaiveDate::from_ymd_opt(2025, 2, 1).expect("Invalid date");
    let router = GameServer::new(StaticRoster::new(roster()))
        .with_fixed_day(day)
        .with_reveal_answer(reveal_answer)
        .router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server failed");
    });
    format!("http://{}", addr)
}

fn service(store: &MemoryStore) -> PlayerService<MemoryStore, FixedClock> {
    let now = DateTime::parse_from_rfc3339("2025-02-01T12:00:00+00:00").expect("Invalid timestamp");
    PlayerService::with_clock(store.clone(), FixedClock(now))
}

async fn setup_play(reveal_answer: bool, store: &MemoryStore) -> PlayLoop<MemoryStore, FixedClock> {
    let url = spawn_server(reveal_answer).await;
    PlayLoop::start(GameClient::new(url), service(store)).await
}

fn text(out: &[u8]) -> String {
    String::from_utf8(out.to_vec()).expect("Output is not UTF-8")
}

#[test]
fn test_input_parsing() {
    assert_eq!(Input::parse("   "), Input::Empty);
    assert_eq!(Input::parse("QUIT"), Input::Quit);
    assert_eq!(Input::parse("?rai"), Input::Suggest("rai".to_string()));
    assert_eq!(
        Input::parse(" Max Verstappen "),
        Input::Guess("Max Verstappen".to_string())
    );
}

#[test]
fn test_board_columns_line_up() {
    let day = NaiveDate::from_ymd_opt(2025, 2, 1).expect("Invalid date");
    let result = judge_guess(&roster(), "Lewis Hamilton", day).expect("Judge failed");
    let header: Vec<char> = board_header().chars().collect();
    let row: Vec<char> = hint_row(&result).chars().collect();
    let symbols: Vec<char> = result
        .hints
        .iter()
        .map(|(_, hint)| hint.symbol().chars().next().expect("Empty symbol"))
        .collect();

    assert_eq!(symbols[0], Hint::Incorrect.symbol().chars().next().expect("Empty symbol"));
    for (column, label) in ["Nm", "Fl", "Tm", "No", "Ag", "Yr", "Wn"].iter().enumerate() {
        let at = 25 + 3 * column;
        assert_eq!(header[at..at + 2].iter().collect::<String>(), *label);
        assert_eq!(row[at], symbols[column], "Column {} misaligned", label);
    }
}

#[tokio::test]
async fn test_client_routes() {
    let client = GameClient::new(format!("{}/", spawn_server(true).await));

    let mut names = client.driver_names().await.expect("Names failed");
    names.sort();
    assert_eq!(names.len(), 3);
    assert_eq!(names[1], "Lewis Hamilton");

    assert_eq!(
        client.submit_guess("Sebastian Vettel").await.expect("Guess failed"),
        GuessReply::NotFound
    );
    match client.submit_guess("max verstappen").await.expect("Guess failed") {
        GuessReply::Judged(result) => assert!(result.is_correct),
        GuessReply::NotFound => panic!("Known driver not found"),
    }
    assert_eq!(
        client.reveal_answer().await.expect("Reveal failed"),
        "Max Verstappen"
    );
}

#[tokio::test]
async fn test_suggestions_fold_accents() {
    let store = MemoryStore::new();
    let play = setup_play(true, &store).await;
    assert_eq!(play.names().len(), 3);

    let mut out = Vec::new();
    let flow = play
        .handle(Input::Suggest("raik".to_string()), &mut out)
        .await
        .expect("Suggest failed");
    assert_eq!(flow, Flow::Continue);
    assert!(text(&out).contains("Kimi Räikkönen"));
}

#[tokio::test]
async fn test_unknown_driver_costs_nothing() {
    let store = MemoryStore::new();
    let play = setup_play(true, &store).await;

    let mut out = Vec::new();
    let flow = play
        .handle(Input::Guess("Nobody".to_string()), &mut out)
        .await
        .expect("Guess failed");
    assert_eq!(flow, Flow::Continue);
    assert!(text(&out).contains("Driver not found: Nobody"));
    assert_eq!(store.read(SESSION_KEY).expect("Read failed"), None);
}

#[tokio::test]
async fn test_winning_game() {
    let store = MemoryStore::new();
    let play = setup_play(true, &store).await;

    let mut out = Vec::new();
    assert_eq!(play.greet(&mut out).await.expect("Greet failed"), Flow::Continue);
    assert!(text(&out).contains("6 guesses left."));

    let flow = play
        .handle(Input::Guess("Lewis Hamilton".to_string()), &mut out)
        .await
        .expect("Guess failed");
    assert_eq!(flow, Flow::Continue);

    let flow = play
        .handle(Input::Guess("Max Verstappen".to_string()), &mut out)
        .await
        .expect("Guess failed");
    assert_eq!(flow, Flow::Done);

    let output = text(&out);
    assert!(output.contains("5 guesses left."));
    assert!(output.contains("Correct! Found in 2/6."));
    assert!(output.contains("Played:     1"));

    let service = service(&store);
    assert_eq!(service.session().expect("Session failed").status(), SessionStatus::Won);
    assert_eq!(*service.statistics().expect("Stats failed").won(), 1);

    let mut again = Vec::new();
    assert_eq!(play.greet(&mut again).await.expect("Greet failed"), Flow::Done);
    assert!(text(&again).contains("already over"));
}

#[tokio::test]
async fn test_losing_game_reveals_answer() {
    let store = MemoryStore::new();
    let play = setup_play(true, &store).await;

    let mut out = Vec::new();
    for _ in 0..5 {
        let flow = play
            .handle(Input::Guess("Lewis Hamilton".to_string()), &mut out)
            .await
            .expect("Guess failed");
        assert_eq!(flow, Flow::Continue);
    }
    let flow = play
        .handle(Input::Guess("Lewis Hamilton".to_string()), &mut out)
        .await
        .expect("Guess failed");
    assert_eq!(flow, Flow::Done);

    let output = text(&out);
    assert!(output.contains("Out of guesses. The driver was Max Verstappen."));
    assert!(output.contains("Lost:       1"));
}

#[tokio::test]
async fn test_hidden_answer_is_unavailable() {
    let store = MemoryStore::new();
    let play = setup_play(false, &store).await;

    let mut out = Vec::new();
    for _ in 0..6 {
        play.handle(Input::Guess("Lewis Hamilton".to_string()), &mut out)
            .await
            .expect("Guess failed");
    }

    let expected = format!("The driver was {}.", UNAVAILABLE_ANSWER);
    assert!(text(&out).contains(&expected));
}

#[tokio::test]
async fn test_unreachable_server_disables_suggestions() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);

    let store = MemoryStore::new();
    let play = PlayLoop::start(GameClient::new(format!("http://{}", addr)), service(&store)).await;
    assert!(play.names().is_empty());

    let mut out = Vec::new();
    assert!(
        play.handle(Input::Guess("Max Verstappen".to_string()), &mut out)
            .await
            .is_err()
    );
}
