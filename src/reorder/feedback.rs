use serde::Serialize;

use super::Session;
use crate::model::config::DragConfig;

/// How one row should be drawn for the current drag state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemVisual {
    /// Vertical translation applied to the row
    pub translation_y: f32,
    pub scale: f32,
    pub alpha: f32,
    /// Lifted rows draw above their neighbours
    pub z_index: f32,
    /// This row is the one being dragged
    pub lifted: bool,
    /// This row is the current drop slot (never true for the lifted row)
    pub drop_target: bool,
}

impl ItemVisual {
    pub const RESTING: ItemVisual = ItemVisual {
        translation_y: 0.0,
        scale: 1.0,
        alpha: 1.0,
        z_index: 0.0,
        lifted: false,
        drop_target: false,
    };
}

/// Visual state of the row at `index` under `session`.
pub fn item_visual(session: &Session, index: usize, style: &DragConfig) -> ItemVisual {
    let Session::Dragging {
        dragged_index,
        offset,
        target_index,
    } = *session
    else {
        return ItemVisual::RESTING;
    };

    if index == dragged_index {
        ItemVisual {
            translation_y: offset,
            scale: style.lifted_scale,
            alpha: style.lifted_alpha,
            z_index: 1.0,
            lifted: true,
            drop_target: false,
        }
    } else if index == target_index {
        ItemVisual {
            scale: style.target_scale,
            drop_target: true,
            ..ItemVisual::RESTING
        }
    } else {
        ItemVisual::RESTING
    }
}
