//! Painting the main window
//!
//! The window is split into three strips: the large preview of the selected
//! screenshot on the left, a thin divider, and the scrolled list on the right.

use crate::list::ShotList;
use crate::picture::Picture;
use crate::region::{Canvas, Region};
use crate::SysColor;

pub const NO_SELECTION_TEXT: &str = "No screenshot selected";
pub const EMPTY_LIST_TEXT: &str = "No screenshots";

/// Paint the whole client area.
pub fn draw_main_window<C: Canvas + ?Sized>(list: &ShotList<C::Picture>, region: Region<'_, C>) {
    region.fill_background();

    let style = list.style();
    let strips = region.split_horizontally_from_right(&[style.divider_width, list.list_width()]);
    let &[large, divider, shots] = strips.as_slice() else {
        return;
    };

    draw_large_shot(list, large);
    draw_divider(divider);
    draw_shot_list(list, shots);
}

pub fn draw_divider<C: Canvas + ?Sized>(region: Region<'_, C>) {
    region.fill_sys_color(SysColor::GrayText);
}

/// Caption and letterboxed preview of the selected screenshot.
pub fn draw_large_shot<C: Canvas + ?Sized>(list: &ShotList<C::Picture>, mut region: Region<'_, C>) {
    region.shrink_by_margin(list.style().large_shot_margin);

    let Some(shot) = list.selected_shot() else {
        region.text_out(NO_SELECTION_TEXT);
        return;
    };

    region.text_out_move_top(&shot.caption());
    region.draw_picture(shot);
}

/// Every item at its laid-out position, shifted up by the scroll offset.
/// Items wholly below the region are skipped.
pub fn draw_shot_list<C: Canvas + ?Sized>(list: &ShotList<C::Picture>, mut region: Region<'_, C>) {
    let style = list.style();
    let margin = style.list_margin;

    region.y -= list.list_scroll();
    region.h += list.list_scroll();
    region.shrink_by_margin(margin);

    if list.is_empty() {
        region.text_out(EMPTY_LIST_TEXT);
        return;
    }

    for (index, shot) in list.shots().enumerate() {
        let item_h = list.item_height(shot, region.w);

        if list.selected_index() == Some(index) {
            let mut frame = region;
            frame.h = item_h;
            frame.shrink_by_margin(-style.highlight_thickness);
            frame.fill_sys_color(SysColor::Highlight);
        }

        region.draw_picture_auto_height(shot);
        region.move_top_by(item_h + margin);

        if region.h <= 0 {
            break;
        }
    }
}
