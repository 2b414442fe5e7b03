/// A player action, independent of how it was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    ToggleAutoplay,
}

impl Intent {
    /// Returns whether the intent keeps repeating while held.
    #[must_use]
    pub const fn repeats(self) -> bool {
        matches!(self, Intent::MoveLeft | Intent::MoveRight | Intent::SoftDrop)
    }
}

/// Directional intents currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldIntents {
    left: bool,
    right: bool,
    down: bool,
}

impl HeldIntents {
    fn slot(&mut self, intent: Intent) -> Option<&mut bool> {
        match intent {
            Intent::MoveLeft => Some(&mut self.left),
            Intent::MoveRight => Some(&mut self.right),
            Intent::SoftDrop => Some(&mut self.down),
            _ => None,
        }
    }

    /// Marks `intent` as held. Returns `true` if it was not held before.
    pub fn press(&mut self, intent: Intent) -> bool {
        self.slot(intent).is_some_and(|held| !std::mem::replace(held, true))
    }

    pub fn release(&mut self, intent: Intent) {
        if let Some(held) = self.slot(intent) {
            *held = false;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_held(&self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft => self.left,
            Intent::MoveRight => self.right,
            Intent::SoftDrop => self.down,
            _ => false,
        }
    }

    /// Returns the held intents in the order they are re-applied.
    pub fn iter(&self) -> impl Iterator<Item = Intent> + '_ {
        [Intent::MoveLeft, Intent::MoveRight, Intent::SoftDrop]
            .into_iter()
            .filter(|intent| self.is_held(*intent))
    }
}
