use crate::model::card::Card;
use crate::model::player::Side;
use crate::model::points::card_points;
use crate::model::suit::Suit;

/// Whether `card` counts as trump. Status flags only matter when
/// `honor_status` is set (temporary-briscola modifier active).
pub fn is_briscola(card: Card, briscola: Suit, honor_status: bool) -> bool {
    card.suit == briscola || (honor_status && card.counts_as_trump())
}

/// True when the following card takes the trick.
///
/// Exactly one trump wins outright; two trumps or two cards of the same
/// suit compare by strength with the lead keeping ties; a different
/// non-trump suit never beats the lead.
pub fn follow_beats_lead(lead: Card, follow: Card, briscola: Suit, honor_status: bool) -> bool {
    let lead_trump = is_briscola(lead, briscola, honor_status);
    let follow_trump = is_briscola(follow, briscola, honor_status);
    match (lead_trump, follow_trump) {
        (true, false) => false,
        (false, true) => true,
        (true, true) => follow.strength() > lead.strength(),
        (false, false) => follow.suit == lead.suit && follow.strength() > lead.strength(),
    }
}

pub(crate) fn trick_winner(
    lead: Card,
    follow: Card,
    leader: Side,
    briscola: Suit,
    honor_status: bool,
) -> Side {
    if follow_beats_lead(lead, follow, briscola, honor_status) {
        leader.opponent()
    } else {
        leader
    }
}

/// Baseline Briscola winner. Status flags are ignored.
pub fn resolve_classic_trick(lead: Card, follow: Card, leader: Side, briscola: Suit) -> Side {
    trick_winner(lead, follow, leader, briscola, false)
}

pub fn classic_points(lead: Card, follow: Card) -> u32 {
    card_points(lead) + card_points(follow)
}
