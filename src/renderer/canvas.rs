//! Canvas 2D executor for runner draw lists

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::frame::{DrawCommand, Sprite};
use crate::assets::AssetSet;
use crate::error::AssetLoadError;

/// Loaded sprite images
pub type SpriteSheet = AssetSet<Sprite, HtmlImageElement>;

/// Start loading every sprite; slots settle as `onload`/`onerror` fire
pub fn load_sprites() -> Rc<RefCell<SpriteSheet>> {
    let sheet = Rc::new(RefCell::new(SpriteSheet::new(Sprite::ALL)));

    for sprite in Sprite::ALL {
        let img = match HtmlImageElement::new() {
            Ok(img) => img,
            Err(_) => {
                sheet.borrow_mut().mark_failed(
                    sprite,
                    AssetLoadError {
                        name: sprite.name().to_string(),
                    },
                );
                continue;
            }
        };
        img.set_cross_origin(Some("anonymous"));

        let on_load = {
            let sheet = sheet.clone();
            let img = img.clone();
            Closure::<dyn FnMut()>::new(move || {
                sheet.borrow_mut().mark_ready(sprite, img.clone());
            })
        };
        let on_error = {
            let sheet = sheet.clone();
            Closure::<dyn FnMut()>::new(move || {
                sheet.borrow_mut().mark_failed(
                    sprite,
                    AssetLoadError {
                        name: sprite.name().to_string(),
                    },
                );
            })
        };
        img.set_onload(Some(on_load.as_ref().unchecked_ref()));
        img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_load.forget();
        on_error.forget();

        img.set_src(sprite.url());
    }

    sheet
}

/// Draws command lists onto a 2D canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    pub fn draw(&self, commands: &[DrawCommand], sprites: &SpriteSheet) {
        for command in commands {
            self.execute(command, sprites);
        }
    }

    fn execute(&self, command: &DrawCommand, sprites: &SpriteSheet) {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Image { sprite, pos, size } => {
                let drawn = sprites.get(*sprite).is_some_and(|img| {
                    ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        pos.x as f64,
                        pos.y as f64,
                        size.x as f64,
                        size.y as f64,
                    )
                    .is_ok()
                });
                if !drawn {
                    log::warn!("Failed to draw {} sprite", sprite.name());
                    for fallback in sprite.fallback(*pos, *size) {
                        self.execute(&fallback, sprites);
                    }
                }
            }
            DrawCommand::FillRect { color, pos, size } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCommand::FillCircle {
                color,
                center,
                radius,
            } => {
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                let _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                ctx.fill();
            }
            DrawCommand::Text {
                text,
                pos,
                font,
                color,
                align,
            } => {
                ctx.set_fill_style_str(color);
                ctx.set_font(font);
                ctx.set_text_align(align.as_css());
                let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
            }
        }
    }
}
