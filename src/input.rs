//! Abstract input consumed by the frame loop. The binary translates terminal
//! key events into these; tests build them by hand.

/// Keys currently held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Speed modifier; also turns a shot into a multi-beam volley.
    pub boost: bool,
}

impl InputState {
    /// Net movement as a sign pair; opposite keys cancel out.
    pub fn movement(&self) -> (i32, i32) {
        let dx = self.right as i32 - self.left as i32;
        let dy = self.down as i32 - self.up as i32;
        (dx, dy)
    }
}

/// Discrete key-down events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Fire,
    Emp,
    Invincibility,
    Shield,
    Quit,
}

/// Everything the loop reads at the start of a frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub held: InputState,
    /// Actions pressed since the previous frame, in arrival order.
    pub actions: Vec<Action>,
}

impl FrameInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_actions(held: InputState, actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            held,
            actions: actions.into_iter().collect(),
        }
    }
}
