use bevy_ecs::prelude::*;
use raylib::ffi;
use raylib::prelude::*;

use crate::components::textbox::Textbox;
use crate::resources::scene::Scene;
use crate::resources::scenetextures::SceneTextures;
use crate::resources::screensize::ScreenSize;

const TEXT_SIZE: f32 = 18.0;
const TEXT_SPACING: f32 = 3.0;
/// Text inset from the bubble's top-left corner.
const TEXT_PADDING: f32 = 10.0;

/// Draw one frame: kittens background, speech bubbles, then the mouse.
pub fn render_system(
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    scene: NonSend<Scene>,
    textures: NonSend<SceneTextures>,
    screen: Res<ScreenSize>,
) {
    let mut d = rl.begin_drawing(&th);
    d.clear_background(Color::BLACK);

    // Background stretched over the whole screen
    if let Some(tex) = textures.kitten_frames.current() {
        let src = Rectangle {
            x: 0.0,
            y: 0.0,
            width: tex.width as f32,
            height: tex.height as f32,
        };
        let dest = Rectangle {
            x: 0.0,
            y: 0.0,
            width: screen.w as f32,
            height: screen.h as f32,
        };
        d.draw_texture_pro(tex, src, dest, Vector2::zero(), 0.0, Color::WHITE);
    }

    match textures.font.as_ref() {
        Some(font) => {
            for textbox in scene.textboxes.iter() {
                draw_textbox(&mut d, textbox, font);
            }
        }
        None => {
            let font = d.get_font_default();
            for textbox in scene.textboxes.iter() {
                draw_textbox(&mut d, textbox, &font);
            }
        }
    }

    let mouse = &scene.mouse;
    if let Some(tex) = textures.mouse_frame(mouse.current_frame) {
        d.draw_texture_ex(tex, mouse.draw_position(), 0.0, mouse.scale, Color::WHITE);
    }
}

fn draw_textbox(d: &mut RaylibDrawHandle, textbox: &Textbox, font: &impl AsRef<ffi::Font>) {
    if !textbox.visible {
        return;
    }

    let offset = textbox.draw_offset();

    d.draw_rectangle(
        (textbox.x + offset.x) as i32,
        (textbox.y + offset.y) as i32,
        textbox.w as i32,
        textbox.h as i32,
        textbox.color,
    );
    for tri in textbox.decoration.iter() {
        let [v1, v2, v3] = tri.shifted(offset);
        d.draw_triangle(v1, v2, v3, textbox.color);
    }

    if !textbox.text_on {
        return;
    }

    let x = textbox.x + offset.x + TEXT_PADDING;
    let y = textbox.y + offset.y + TEXT_PADDING;

    // One pixel outline in the back colour
    for i in -1..=1 {
        for j in -1..=1 {
            d.draw_text_ex(
                font,
                &textbox.text,
                Vector2 {
                    x: x + i as f32,
                    y: y + j as f32,
                },
                TEXT_SIZE,
                TEXT_SPACING,
                textbox.text_color_back,
            );
        }
    }
    d.draw_text_ex(
        font,
        &textbox.text,
        Vector2 { x, y },
        TEXT_SIZE,
        TEXT_SPACING,
        textbox.text_color_front,
    );
}
