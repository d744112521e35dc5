//! Output filename composition.

use crate::frame::FrameSlot;
use crate::sprite::SpriteName;

/// Builds `<path><sprite><subsprite><frame letter><angle code>`.
///
/// `path` is a prefix and is concatenated as-is, so it normally ends with a
/// separator. No extension is added; the renderer appends its own.
pub fn compose_filename(path: &str, sprite: &SpriteName, slot: &FrameSlot, angle_code: &str) -> String {
    let sprite_segment = if slot.is_first_cycle() {
        sprite.full()
    } else {
        sprite.truncated()
    };

    let mut name = String::with_capacity(path.len() + 8);
    name.push_str(path);
    name.push_str(sprite_segment);
    if let Some(digit) = slot.subsprite {
        name.push(digit);
    }
    name.push(slot.letter);
    name.push_str(angle_code);
    name
}
