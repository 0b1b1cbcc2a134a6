use cabo_rs::cards::MAX_VALUE;
use cabo_rs::deck::{build_deck, copies_of, deal, Deck, DECK_SIZE};
use cabo_rs::game::{Game, GameConfig, Phase};
use cabo_rs::hand::Seat;
use cabo_rs::scoring::{resolve_values, Outcome, FAILED_CALL_PENALTY};
use cabo_rs::visibility::SlotVisibility;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn any_value() -> impl Strategy<Value = u8> {
    0u8..=MAX_VALUE
}

fn any_hand() -> impl Strategy<Value = [u8; 4]> {
    prop::array::uniform4(any_value())
}

/// Both hands dealt as given, setup done, and `tail` on the deck.
fn scripted(player: [u8; 4], opponent: [u8; 4], tail: &[u8]) -> Game {
    let mut values = Vec::with_capacity(9 + tail.len());
    values.extend_from_slice(&player);
    values.extend_from_slice(&opponent);
    values.push(0);
    values.extend_from_slice(tail);
    let mut game = Game::with_deck(GameConfig::default(), Deck::stacked(&values).unwrap()).unwrap();
    game.reveal_setup_slot(0).unwrap();
    game.reveal_setup_slot(1).unwrap();
    game
}

proptest! {
    #[test]
    fn shuffled_deck_has_cabo_composition(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let deck = build_deck(&mut rng);
        prop_assert_eq!(deck.len(), DECK_SIZE);
        let mut counts = [0usize; (MAX_VALUE + 1) as usize];
        for card in deck.iter() {
            counts[card.value() as usize] += 1;
        }
        for value in 0..=MAX_VALUE {
            prop_assert_eq!(counts[value as usize], copies_of(value));
        }
    }

    #[test]
    fn hand_value_ignores_order(
        (original, shuffled) in any_hand().prop_flat_map(|h| (Just(h), Just(h.to_vec()).prop_shuffle()))
    ) {
        let mut values = original.to_vec();
        values.extend_from_slice(&shuffled);
        values.push(0);
        let dealt = deal(Deck::stacked(&values).unwrap()).unwrap();
        prop_assert_eq!(dealt.player.value(), dealt.opponent.value());
        prop_assert_eq!(dealt.player.value(), original.iter().map(|&v| v as u32).sum::<u32>());
    }

    #[test]
    fn swap_moves_cards_without_changing_the_total(
        player in any_hand(),
        opponent in any_hand(),
        own in 0usize..4,
        theirs in 0usize..4,
        card in 11u8..=12,
    ) {
        let mut game = scripted(player, opponent, &[card]);
        let before = game.hand(Seat::Player).value() + game.hand(Seat::Opponent).value();
        game.draw_from_deck().unwrap();
        game.use_action_card().unwrap();
        game.select_own_slot(own).unwrap();
        game.select_opponent_slot(theirs).unwrap();

        let after = game.hand(Seat::Player).value() + game.hand(Seat::Opponent).value();
        prop_assert_eq!(before, after);
        prop_assert_eq!(game.hand(Seat::Player).values()[own], opponent[theirs]);
        prop_assert_eq!(game.hand(Seat::Opponent).values()[theirs], player[own]);
        prop_assert_eq!(game.visibility().state(Seat::Player, own), SlotVisibility::Hidden);
        prop_assert_eq!(game.visibility().state(Seat::Opponent, theirs), SlotVisibility::Hidden);
    }

    #[test]
    fn replaced_slot_is_unknown(player in any_hand(), slot in 0usize..4, drawn in any_value()) {
        let mut game = scripted(player, [1; 4], &[drawn, 0]);
        game.draw_from_deck().unwrap();
        game.select_own_slot(slot).unwrap();
        prop_assert_eq!(game.hand(Seat::Player).values()[slot], drawn);
        prop_assert_eq!(game.visibility().state(Seat::Player, slot), SlotVisibility::Hidden);
        prop_assert_eq!(game.discard().top().map(|c| c.value()), Some(player[slot]));
    }

    #[test]
    fn fresh_round_hides_everything(seed in any::<u64>()) {
        let game = Game::new(GameConfig { seed: Some(seed) });
        prop_assert_eq!(game.phase(), Phase::Setup);
        prop_assert_eq!(game.discard().len(), 1);
        prop_assert_eq!(game.deck_len(), 43);
        for viewer in Seat::BOTH {
            let view = game.view(viewer);
            for hand in view.hands {
                prop_assert!(hand.iter().all(|s| s.value.is_none()));
            }
        }
    }

    #[test]
    fn same_seed_deals_same_round(seed in any::<u64>()) {
        let a = Game::new(GameConfig { seed: Some(seed) });
        let b = Game::new(GameConfig { seed: Some(seed) });
        prop_assert_eq!(a.hand(Seat::Player).values(), b.hand(Seat::Player).values());
        prop_assert_eq!(a.hand(Seat::Opponent).values(), b.hand(Seat::Opponent).values());
        prop_assert_eq!(a.discard().top(), b.discard().top());
    }

    #[test]
    fn penalty_only_for_a_caller_left_higher(
        player in 0u32..=52,
        opponent in 0u32..=52,
        caller in prop_oneof![Just(None), Just(Some(Seat::Player)), Just(Some(Seat::Opponent))],
    ) {
        let result = resolve_values(player, opponent, caller);
        let expected_penalty = caller.filter(|&seat| {
            let (mine, theirs) = match seat {
                Seat::Player => (player, opponent),
                Seat::Opponent => (opponent, player),
            };
            mine > theirs
        });
        prop_assert_eq!(result.penalized, expected_penalty);
        for seat in Seat::BOTH {
            let extra = if expected_penalty == Some(seat) { FAILED_CALL_PENALTY } else { 0 };
            prop_assert_eq!(result.final_value(seat), result.hand_value(seat) + extra);
        }
        let [p, o] = [result.final_value(Seat::Player), result.final_value(Seat::Opponent)];
        let expected = match p.cmp(&o) {
            std::cmp::Ordering::Less => Outcome::Won(Seat::Player),
            std::cmp::Ordering::Greater => Outcome::Won(Seat::Opponent),
            std::cmp::Ordering::Equal => Outcome::Tie,
        };
        prop_assert_eq!(result.outcome, expected);
    }
}
