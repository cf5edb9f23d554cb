//! Bot policy driving virtual players through the regular intent surface.
//!
//! Aggressive bots close in on the nearest opponent and attack. Defensive
//! bots go for items, keep their distance and try to flee fights they are
//! losing.
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use tactics_core::{
    ActionOutcome, BotProfile, ItemKind, PartyConfig, PartyEvent, Player, PlayerId, PlayerKind,
    Position, TurnPhase,
};
use tactics_runtime::{Envelope, PartyHandle, PartySnapshot, Result};

pub struct BotDriver {
    handle: PartyHandle,
}

impl BotDriver {
    pub fn new(handle: PartyHandle) -> Self {
        Self { handle }
    }

    /// Reacts to party events until the party ends or its bus closes.
    /// Returns the winner, if any.
    pub async fn run(&self, mut events: broadcast::Receiver<Envelope>) -> Result<Option<PlayerId>> {
        loop {
            let envelope = match events.recv().await {
                Ok(envelope) => envelope,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "bot driver lagged behind");
                    continue;
                }
                Err(RecvError::Closed) => return Ok(None),
            };

            match envelope.event {
                PartyEvent::VirtualPlayerTurn { player } => self.play_round(player).await?,
                PartyEvent::TurnResumed => {
                    let snapshot = self.handle.snapshot().await?;
                    if let Some(current) = snapshot.current_player
                        && profile_of(&snapshot, current).is_some()
                    {
                        self.play_round(current).await?;
                    }
                }
                PartyEvent::FightTurn { player } => self.fight(player).await?,
                PartyEvent::ItemChoiceRequired { player, items } => {
                    self.choose_item(player, &items).await?;
                }
                PartyEvent::GameEnded { winner } => {
                    info!(?winner, "party ended");
                    return Ok(winner);
                }
                _ => {}
            }
        }
    }

    async fn play_round(&self, pid: PlayerId) -> Result<()> {
        let snapshot = self.handle.snapshot().await?;
        if !holds_active_round(&snapshot, pid) {
            return Ok(());
        }
        let Some(profile) = profile_of(&snapshot, pid) else {
            return Ok(());
        };

        if self.try_attack(&snapshot, pid).await? {
            return Ok(());
        }

        let reachable = self.handle.accessible_positions(pid).await?;
        if let Some(target) = pick_destination(&snapshot, pid, profile, &reachable) {
            debug!(player = %pid, %target, ?profile, "bot moving");
            self.handle.move_player(pid, target).await?;

            let snapshot = self.handle.snapshot().await?;
            if !holds_active_round(&snapshot, pid) {
                return Ok(());
            }
            if profile == BotProfile::Aggressive && self.try_attack(&snapshot, pid).await? {
                return Ok(());
            }
        }

        let snapshot = self.handle.snapshot().await?;
        if holds_active_round(&snapshot, pid) {
            self.handle.end_round(pid).await?;
        }
        Ok(())
    }

    /// Starts a fight with an adjacent opponent. Returns whether one started.
    async fn try_attack(&self, snapshot: &PartySnapshot, pid: PlayerId) -> Result<bool> {
        if snapshot.player(pid).is_none_or(|me| me.actions_left == 0) {
            return Ok(false);
        }
        let interactive = self.handle.interactive_positions(pid).await?;
        let target = interactive.into_iter().find(|position| {
            snapshot
                .players
                .iter()
                .any(|player| player.id != pid && player.is_active() && player.position() == *position)
        });
        let Some(target) = target else {
            return Ok(false);
        };

        let outcome = self.handle.execute_action(pid, target).await?;
        Ok(outcome == ActionOutcome::Applied)
    }

    async fn fight(&self, pid: PlayerId) -> Result<()> {
        let snapshot = self.handle.snapshot().await?;
        let Some(profile) = profile_of(&snapshot, pid) else {
            return Ok(());
        };
        let Some(fighters) = self.handle.fighters().await? else {
            return Ok(());
        };
        let Some(me) = fighters.iter().find(|fighter| fighter.pid == pid) else {
            return Ok(());
        };

        let flee = profile == BotProfile::Defensive && me.remain_escape > 0 && me.life < me.max_life;
        let outcome = if flee {
            self.handle.handle_escape().await?
        } else {
            self.handle.handle_attack().await?
        };
        if outcome == ActionOutcome::Rejected {
            self.handle.handle_attack().await?;
        }
        Ok(())
    }

    /// Keeps the flag if held, otherwise drops the item picked up last.
    async fn choose_item(&self, pid: PlayerId, items: &[ItemKind]) -> Result<()> {
        let snapshot = self.handle.snapshot().await?;
        if profile_of(&snapshot, pid).is_none() {
            return Ok(());
        }
        let drop = items
            .iter()
            .rev()
            .find(|item| **item != ItemKind::Flag)
            .or(items.last());
        if let Some(&item) = drop {
            self.handle.remove_player_item(pid, item).await?;
        }
        Ok(())
    }
}

fn profile_of(snapshot: &PartySnapshot, pid: PlayerId) -> Option<BotProfile> {
    match snapshot.player(pid)?.kind {
        PlayerKind::Virtual(profile) => Some(profile),
        PlayerKind::Human => None,
    }
}

fn holds_active_round(snapshot: &PartySnapshot, pid: PlayerId) -> bool {
    snapshot.phase == TurnPhase::Active && snapshot.current_player == Some(pid)
}

fn item_at(snapshot: &PartySnapshot, position: Position) -> ItemKind {
    let (Ok(x), Ok(y)) = (usize::try_from(position.x), usize::try_from(position.y)) else {
        return ItemKind::None;
    };
    snapshot
        .map
        .get(y)
        .and_then(|row| row.get(x))
        .and_then(|&value| ItemKind::from_repr(value % PartyConfig::TILE_BASE))
        .unwrap_or(ItemKind::None)
}

fn nearest_opponent_distance(snapshot: &PartySnapshot, pid: PlayerId, from: Position) -> Option<u32> {
    snapshot
        .players
        .iter()
        .filter(|player| player.id != pid && player.is_active())
        .map(|player| from.manhattan(player.position()))
        .min()
}

/// Where the bot wants to stand at the end of its walk. `None` to stay.
fn pick_destination(
    snapshot: &PartySnapshot,
    pid: PlayerId,
    profile: BotProfile,
    reachable: &[Position],
) -> Option<Position> {
    let me: &Player = snapshot.player(pid)?;
    let own = me.position();

    // A flag carrier heads home.
    if me.holds(ItemKind::Flag) {
        let home = me.placement.start;
        return reachable
            .iter()
            .copied()
            .min_by_key(|position| position.manhattan(home))
            .filter(|position| *position != own);
    }

    let distance = |position: &Position| nearest_opponent_distance(snapshot, pid, *position).unwrap_or(0);
    let target = match profile {
        BotProfile::Aggressive => reachable
            .iter()
            .copied()
            .filter(|position| distance(position) > 0)
            .min_by_key(distance),
        BotProfile::Defensive => reachable
            .iter()
            .copied()
            .find(|position| *position != own && item_at(snapshot, *position).is_collectible())
            .or_else(|| reachable.iter().copied().max_by_key(distance)),
    };
    target.filter(|position| *position != own)
}
