//! Property-based round-trip tests for the typed messages.
//!
//! For every message type that can be both sent and received, encoding a
//! value and decoding the resulting line must give the value back. Types
//! that require a source on receipt are encoded with a user prefix
//! prepended, the way a server relays them.

use proptest::prelude::*;
use slirc_proto::command::{
    Cap, Decodable, Encodable, Join, Kick, Mode, Nick, Notice, Part, Ping, Pong, Privmsg, Quit,
    Topic,
};
use slirc_proto::message::parse;
use slirc_proto::prefix::{Prefix, UserPrefix};

// =============================================================================
// STRATEGIES
// =============================================================================

fn nickname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z\\[\\]\\\\^_`{|}][a-zA-Z0-9\\-\\[\\]\\\\^_`{|}]{0,8}")
        .expect("valid regex")
}

fn username_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("~?[a-zA-Z][a-zA-Z0-9]{0,9}").expect("valid regex")
}

fn hostname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9]+(\\.[a-z0-9]+)*").expect("valid regex")
}

fn channel_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[#&][a-zA-Z0-9_\\-]{1,49}").expect("valid regex")
}

/// Middle parameter: non-empty, no spaces, never starting with `:`.
fn token_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9.*!@_\\-][a-zA-Z0-9.*!@:_\\-]{0,15}")
        .expect("valid regex")
}

/// Trailing text: anything but CR, LF and NUL, spaces included.
fn message_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[^\r\n\0]{0,400}").expect("valid regex"),
        Just(String::new()),
        Just(":".to_string()),
        Just(" leading and trailing ".to_string()),
        Just("multiple   spaces   here".to_string()),
        Just(":starts with colon".to_string()),
    ]
}

fn user_prefix_strategy() -> impl Strategy<Value = UserPrefix> {
    (nickname_strategy(), username_strategy(), hostname_strategy())
        .prop_map(|(nick, user, host)| UserPrefix::new(nick, user, host))
}

/// Re-parse an encoded line as if relayed by the server from `prefix`.
fn relay<T: Decodable, P: std::fmt::Display>(prefix: &P, encoded: &str) -> T {
    let line = parse(&format!(":{} {}", prefix, encoded)).expect("encoded line parses");
    T::decode(&line).expect("encoded line decodes")
}

fn reparse<T: Decodable>(encoded: &str) -> T {
    let line = parse(encoded).expect("encoded line parses");
    T::decode(&line).expect("encoded line decodes")
}

// =============================================================================
// ROUND-TRIPS
// =============================================================================

proptest! {
    #[test]
    fn privmsg_roundtrip(
        prefix in user_prefix_strategy(),
        target in prop_oneof![channel_strategy(), nickname_strategy()],
        text in message_text_strategy(),
    ) {
        let mut msg = Privmsg::new(target, text);
        msg.prefix = Some(prefix.clone());
        prop_assert_eq!(relay::<Privmsg, _>(&prefix, &msg.encode()), msg);
    }

    #[test]
    fn notice_roundtrip_without_source(
        target in channel_strategy(),
        text in message_text_strategy(),
    ) {
        let msg = Notice::new(target, text);
        prop_assert_eq!(reparse::<Notice>(&msg.encode()), msg);
    }

    #[test]
    fn nick_roundtrip(prefix in user_prefix_strategy(), nick in nickname_strategy()) {
        let mut msg = Nick::new(nick);
        msg.prefix = Some(prefix.clone());
        prop_assert_eq!(relay::<Nick, _>(&prefix, &msg.encode()), msg);
    }

    #[test]
    fn join_roundtrip(
        prefix in user_prefix_strategy(),
        channels in prop::collection::vec(channel_strategy(), 1..4),
        keys in prop::collection::vec(token_strategy(), 0..3),
    ) {
        let mut msg = Join::with_keys(channels, keys);
        msg.prefix = Some(prefix.clone());
        prop_assert_eq!(relay::<Join, _>(&prefix, &msg.encode()), msg);
    }

    #[test]
    fn part_roundtrip(
        prefix in user_prefix_strategy(),
        channel in channel_strategy(),
        reason in prop::option::of(message_text_strategy()),
    ) {
        let mut msg = Part::new(channel, reason);
        msg.prefix = Some(prefix.clone());
        prop_assert_eq!(relay::<Part, _>(&prefix, &msg.encode()), msg);
    }

    #[test]
    fn kick_roundtrip(
        prefix in user_prefix_strategy(),
        channel in channel_strategy(),
        target in nickname_strategy(),
        reason in message_text_strategy(),
    ) {
        let mut msg = Kick::new(channel, target, reason);
        msg.prefix = Some(prefix.clone());
        prop_assert_eq!(relay::<Kick, _>(&prefix, &msg.encode()), msg);
    }

    #[test]
    fn mode_roundtrip(
        prefix in user_prefix_strategy(),
        channel in channel_strategy(),
        flags in prop::string::string_regex("[+-][a-zA-Z]{1,4}([+-][a-zA-Z]{1,3})?").expect("valid regex"),
        args in prop::collection::vec(token_strategy(), 0..4),
    ) {
        let mut msg = Mode::new(channel, flags, args);
        msg.prefix = Some(Prefix::User(prefix.clone()));
        prop_assert_eq!(relay::<Mode, _>(&prefix, &msg.encode()), msg);
    }

    #[test]
    fn topic_roundtrip(channel in channel_strategy(), topic in message_text_strategy()) {
        let msg = Topic::new(channel, topic);
        prop_assert_eq!(reparse::<Topic>(&msg.encode()), msg);
    }

    #[test]
    fn ping_pong_roundtrip(
        token in message_text_strategy(),
        server in token_strategy(),
        second in prop::option::of(message_text_strategy()),
    ) {
        let single = Ping::new(token);
        prop_assert_eq!(reparse::<Ping>(&single.encode()), single.clone());

        let pong = Pong::reply_to(&single);
        prop_assert_eq!(reparse::<Pong>(&pong.encode()), pong);

        let double = Ping { server1: server, server2: second };
        let decoded = reparse::<Ping>(&double.encode());
        prop_assert_eq!(decoded, double);
    }

    #[test]
    fn quit_roundtrip(
        prefix in user_prefix_strategy(),
        reason in prop::option::of(message_text_strategy()),
    ) {
        let mut msg = Quit::new(reason);
        msg.prefix = Some(prefix.clone());
        prop_assert_eq!(relay::<Quit, _>(&prefix, &msg.encode()), msg);
    }

    #[test]
    fn cap_roundtrip(
        target in prop::option::of(prop_oneof![Just("*".to_string()), nickname_strategy()]),
        subcommand in prop::string::string_regex("LS|LIST|REQ|ACK|NAK|END").expect("valid regex"),
        caps in prop::collection::vec(
            prop::string::string_regex("[a-z][a-z0-9\\-./]{0,20}").expect("valid regex"),
            0..5,
        ),
    ) {
        let mut msg = Cap::new(subcommand, caps);
        msg.target = target;
        prop_assert_eq!(reparse::<Cap>(&msg.encode()), msg);
    }

    /// Arbitrary printable input never panics the tokenizer.
    #[test]
    fn parse_never_panics(raw in "[^\0]{0,600}") {
        let _ = parse(&raw);
    }
}
