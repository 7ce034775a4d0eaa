//! Integration tests for the bot's connection lifecycle.
//!
//! Runs the real binary against a scripted server: registration, autojoin,
//! keepalive, recovery from bad input and reconnection.

mod common;

use std::time::Duration;

use common::{FakeServer, TestBot};

#[tokio::test]
async fn test_registration_and_autojoin() {
    let server = FakeServer::bind().await.expect("bind fake server");
    let _bot = TestBot::spawn(
        server.port(),
        "password = \"secret\"\nchannels = [\"#one\", \"#two\"]",
    )
    .expect("spawn bot");

    let mut link = server.accept().await.expect("bot connects");

    let pass = link.recv().await.expect("PASS");
    assert_eq!(pass.verb, "PASS");
    assert_eq!(pass.params(), ["secret"]);

    link.register("bot").await.expect("registration");

    let join = link.recv_verb("JOIN").await.expect("first JOIN");
    assert_eq!(join.params(), ["#one"]);
    let join = link.recv_verb("JOIN").await.expect("second JOIN");
    assert_eq!(join.params(), ["#two"]);

    link.send_raw(":bot!slirc@test.host JOIN #one")
        .await
        .unwrap();
    let who = link.recv_verb("WHO").await.expect("WHO after self join");
    assert_eq!(who.params(), ["#one", "%nuhaf"]);
}

#[tokio::test]
async fn test_answers_ping() {
    let server = FakeServer::bind().await.unwrap();
    let _bot = TestBot::spawn(server.port(), "").unwrap();
    let mut link = server.accept().await.unwrap();
    link.register("bot").await.unwrap();

    link.send_raw("PING :keepalive-42").await.unwrap();
    let pong = link.recv_verb("PONG").await.expect("PONG");
    assert_eq!(pong.params(), ["keepalive-42"]);
}

#[tokio::test]
async fn test_nickname_in_use_during_registration() {
    let server = FakeServer::bind().await.unwrap();
    let _bot = TestBot::spawn(server.port(), "").unwrap();
    let mut link = server.accept().await.unwrap();

    link.recv_verb("USER").await.unwrap();
    link.send_raw(":irc.test 433 * bot :Nickname is already in use")
        .await
        .unwrap();
    let nick = link.recv_verb("NICK").await.expect("retry NICK");
    assert_eq!(nick.params(), ["bot_"]);
}

#[tokio::test]
async fn test_bad_lines_do_not_break_the_connection() {
    let server = FakeServer::bind().await.unwrap();
    let _bot = TestBot::spawn(server.port(), "").unwrap();
    let mut link = server.accept().await.unwrap();
    link.register("bot").await.unwrap();

    link.send_raw(":irc.test").await.unwrap();
    link.send_raw(":irc.test KICK #nowhere").await.unwrap();
    link.send_raw("NICK").await.unwrap();
    link.send_raw(":stranger!s@h PART #unknown").await.unwrap();

    link.send_raw("PING :still-here").await.unwrap();
    let pong = link.recv_verb("PONG").await.expect("PONG after garbage");
    assert_eq!(pong.params(), ["still-here"]);
}

#[tokio::test]
async fn test_reconnects_with_fresh_state() {
    let server = FakeServer::bind().await.unwrap();
    let _bot = TestBot::spawn(server.port(), "reconnect_delay_secs = 1").unwrap();

    let mut link = server.accept().await.unwrap();
    link.recv_verb("USER").await.unwrap();
    link.send_raw(":irc.test 433 * bot :Nickname is already in use")
        .await
        .unwrap();
    link.recv_verb("NICK").await.unwrap();
    link.send_raw("ERROR :Closing Link: test over").await.unwrap();
    drop(link);

    // the retried nickname from the first session is not carried over
    let mut link = server.accept().await.expect("bot reconnects");
    link.register("bot").await.expect("registration after reconnect");
    link.send_raw("PING :again").await.unwrap();
    assert_eq!(link.recv_verb("PONG").await.unwrap().params(), ["again"]);
}

#[tokio::test]
async fn test_exits_when_link_closes_without_reconnect() {
    let server = FakeServer::bind().await.unwrap();
    let mut bot = TestBot::spawn(server.port(), "reconnect_delay_secs = 0").unwrap();
    let mut link = server.accept().await.unwrap();
    link.register("bot").await.unwrap();

    link.send_raw("ERROR :Closing Link: bye").await.unwrap();
    drop(link);

    for _ in 0..50 {
        if bot.has_exited() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("bot did not exit after the link closed");
}
