use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::types::TextAlign;

pub fn display_width(s: &str) -> i32 {
    s.width() as i32
}

pub fn char_width(c: char) -> i32 {
    c.width().unwrap_or(0) as i32
}

/// Cut `s` to `max_width` columns, ending in an ellipsis when shortened.
pub fn truncate_to_width(s: &str, max_width: i32) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 0 {
        return String::new();
    }

    let target_width = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = char_width(ch);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

/// Column at which text of `text_width` starts inside `available` columns.
pub fn align_offset(text_width: i32, available: i32, align: TextAlign) -> i32 {
    let spare = (available - text_width).max(0);
    match align {
        TextAlign::Left => 0,
        TextAlign::Center => spare / 2,
        TextAlign::Right => spare,
    }
}
