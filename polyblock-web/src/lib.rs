/// Polyblock Web - WASM viewer drawing the current piece with WebGL2
///
/// JavaScript owns the event wiring and the animation loop; it calls
/// `frame(dt)` every animation frame and forwards pointer drags and button
/// presses to the viewer.
use nalgebra::Matrix4;
use polyblock_core::{Camera, Catalog, Mesh, PieceStage, SpinController, SpinSettings, Style, Transform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as Gl, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation,
};

mod console;

const VERTEX_SHADER: &str = r#"#version 300 es
in vec3 a_position;
in vec3 a_normal;
in vec3 a_color;
uniform mat4 u_mvp;
uniform mat4 u_model;
out vec3 v_normal;
out vec3 v_color;
void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_normal = mat3(u_model) * a_normal;
    v_color = a_color;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;
in vec3 v_normal;
in vec3 v_color;
out vec4 out_color;
const vec3 LIGHT = normalize(vec3(0.4, 0.7, 1.0));
void main() {
    float light = 0.3 + 0.7 * max(dot(normalize(v_normal), LIGHT), 0.0);
    out_color = vec4(v_color * light, 1.0);
}
"#;

/// position, normal, color
const FLOATS_PER_VERTEX: usize = 9;

/// Flatten a mesh into the interleaved vertex layout the shaders expect.
pub fn interleave(mesh: &Mesh) -> Vec<f32> {
    let mut data = Vec::with_capacity(mesh.triangles.len() * 3 * FLOATS_PER_VERTEX);
    for triangle in &mesh.triangles {
        let color = triangle.color.to_f32();
        for vertex in &triangle.vertices {
            data.extend_from_slice(vertex.position.coords.as_slice());
            data.extend_from_slice(vertex.normal.as_slice());
            data.extend_from_slice(&color);
        }
    }
    data
}

fn js_error(message: impl Into<String>) -> JsValue {
    JsValue::from_str(&message.into())
}

#[wasm_bindgen]
pub struct WebViewer {
    gl: Gl,
    program: WebGlProgram,
    buffer: WebGlBuffer,
    u_mvp: WebGlUniformLocation,
    u_model: WebGlUniformLocation,
    vertex_count: i32,
    camera: Camera,
    stage: PieceStage,
    catalog: Catalog,
    spin: SpinController,
    rng: StdRng,
}

#[wasm_bindgen]
impl WebViewer {
    /// Attach to the `<canvas>` with id `canvas_id`. `seed` drives piece
    /// selection (pass e.g. `Date.now()`).
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, seed: f64) -> Result<WebViewer, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| js_error("no document available"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| js_error(format!("no element with id `{canvas_id}`")))?
            .dyn_into()
            .map_err(|_| js_error(format!("`{canvas_id}` is not a canvas")))?;
        let gl: Gl = canvas
            .get_context("webgl2")?
            .ok_or_else(|| js_error("WebGL2 is not supported"))?
            .dyn_into()?;

        let program = link_program(&gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
        let buffer = gl.create_buffer().ok_or_else(|| js_error("cannot create buffer"))?;
        let u_mvp = gl
            .get_uniform_location(&program, "u_mvp")
            .ok_or_else(|| js_error("missing uniform u_mvp"))?;
        let u_model = gl
            .get_uniform_location(&program, "u_model")
            .ok_or_else(|| js_error("missing uniform u_model"))?;

        gl.enable(Gl::DEPTH_TEST);
        gl.enable(Gl::CULL_FACE);
        gl.clear_color(0.08, 0.08, 0.1, 1.0);

        let mut viewer = WebViewer {
            camera: Camera::new(canvas.width(), canvas.height()),
            gl,
            program,
            buffer,
            u_mvp,
            u_model,
            vertex_count: 0,
            stage: PieceStage::new(Style::default()),
            catalog: Catalog::builtin(),
            spin: SpinController::new(SpinSettings::default()),
            rng: StdRng::seed_from_u64(seed as u64),
        };
        viewer.generate_new_piece();
        Ok(viewer)
    }

    /// Swap in a new random piece and upload its geometry.
    pub fn generate_new_piece(&mut self) {
        self.stage.generate_new_piece(&self.catalog, &mut self.rng);
        self.stage.set_orientation(self.spin.orientation());

        let mesh = self.stage.piece().map(Mesh::from_node).unwrap_or_default();
        let data = interleave(&mesh);
        self.vertex_count = (data.len() / FLOATS_PER_VERTEX) as i32;

        self.gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&self.buffer));
        let array = js_sys::Float32Array::from(data.as_slice());
        self.gl
            .buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &array, Gl::STATIC_DRAW);
    }

    /// Pointer drag in CSS pixels.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.spin.drag(dx, dy);
    }

    /// Returns whether auto-spin is now running.
    pub fn toggle_pause(&mut self) -> bool {
        self.spin.toggle_pause()
    }

    pub fn piece_name(&self) -> String {
        self.stage.current_piece_name().unwrap_or_default().to_string()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    /// Advance by `dt` seconds and draw.
    pub fn frame(&mut self, dt: f32) {
        self.spin.tick(dt);
        self.stage.set_orientation(self.spin.orientation());

        let model = self
            .stage
            .anchor()
            .map(|anchor| anchor.rotation.to_homogeneous())
            .unwrap_or_else(Matrix4::identity);
        let mvp = Transform::mvp_matrix(&model, &self.camera.view_matrix(), &self.camera.projection_matrix());

        let gl = &self.gl;
        gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
        gl.use_program(Some(&self.program));
        gl.uniform_matrix4fv_with_f32_array(Some(&self.u_mvp), false, mvp.as_slice());
        gl.uniform_matrix4fv_with_f32_array(Some(&self.u_model), false, model.as_slice());

        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&self.buffer));
        let stride = (FLOATS_PER_VERTEX * 4) as i32;
        for (i, name) in ["a_position", "a_normal", "a_color"].iter().enumerate() {
            let location = gl.get_attrib_location(&self.program, name);
            if location < 0 {
                continue;
            }
            let location = location as u32;
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_with_i32(location, 3, Gl::FLOAT, false, stride, (i * 12) as i32);
        }

        gl.draw_arrays(Gl::TRIANGLES, 0, self.vertex_count);
    }
}

fn compile_shader(gl: &Gl, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| js_error("cannot create shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        Err(js_error(gl.get_shader_info_log(&shader).unwrap_or_default()))
    }
}

fn link_program(gl: &Gl, vertex: &str, fragment: &str) -> Result<WebGlProgram, JsValue> {
    let vs = compile_shader(gl, Gl::VERTEX_SHADER, vertex)?;
    let fs = compile_shader(gl, Gl::FRAGMENT_SHADER, fragment)?;
    let program = gl
        .create_program()
        .ok_or_else(|| js_error("cannot create program"))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        Err(js_error(gl.get_program_info_log(&program).unwrap_or_default()))
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console::init();
    log::info!("polyblock web viewer loaded");
    Ok(())
}
