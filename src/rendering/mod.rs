pub mod font;
pub mod pixmap;
pub mod png_io;
pub mod shadow_text;
pub mod text_canvas;

pub use font::{choose_style, FontResolver, ResolvedFont, StyleAvailability};
pub use pixmap::{composite_layer, new_layer};
pub use png_io::{decode_png, encode_png, optimize_png};
pub use shadow_text::{
    draw_text, plan_passes, text_offset, DrawPass, PassKind, SHADOW_BASE_ALPHA, SHADOW_GRAY,
    SHADOW_STEPS,
};
pub use text_canvas::{line_height, PixmapCanvas, TextCanvas, TextLayout, LINE_SPACING};
