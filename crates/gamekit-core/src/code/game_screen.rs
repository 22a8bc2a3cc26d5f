//! Game screen logic seed classes

use super::CodeTemplate;

const JAVA_TEMPLATE: &str = r#"package {package_name};

import com.badlogic.gdx.Gdx;
import com.badlogic.gdx.ScreenAdapter;
import com.badlogic.gdx.graphics.GL20;

public class {class_name} extends ScreenAdapter {

    @Override
    public void show() {
        // Load assets and build the scene here.
    }

    @Override
    public void render(float delta) {
        update(delta);

        Gdx.gl.glClearColor(0f, 0f, 0f, 1f);
        Gdx.gl.glClear(GL20.GL_COLOR_BUFFER_BIT);
    }

    private void update(float delta) {
        // Game logic goes here.
    }

    @Override
    public void resize(int width, int height) {
    }

    @Override
    public void dispose() {
    }
}
"#;

const KOTLIN_TEMPLATE: &str = r#"package {package_name}

import com.badlogic.gdx.Gdx
import com.badlogic.gdx.ScreenAdapter
import com.badlogic.gdx.graphics.GL20

class {class_name} : ScreenAdapter() {

    override fun show() {
        // Load assets and build the scene here.
    }

    override fun render(delta: Float) {
        update(delta)

        Gdx.gl.glClearColor(0f, 0f, 0f, 1f)
        Gdx.gl.glClear(GL20.GL_COLOR_BUFFER_BIT)
    }

    private fun update(delta: Float) {
        // Game logic goes here.
    }

    override fun resize(width: Int, height: Int) {
    }

    override fun dispose() {
    }
}
"#;

/// Substitute both placeholders in one left-to-right pass, so substituted
/// values are never scanned again.
fn bind(template: &str, class_name: &str, package_name: &str) -> Vec<u8> {
    let mut out = String::with_capacity(template.len() + package_name.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{package_name}") {
            out.push_str(package_name);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{class_name}") {
            out.push_str(class_name);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out.into_bytes()
}

/// Java screen class with empty lifecycle hooks
#[derive(Debug, Clone, Copy, Default)]
pub struct GameScreenLogicTemplate;

impl CodeTemplate for GameScreenLogicTemplate {
    fn id(&self) -> &'static str {
        "game-screen-logic"
    }

    fn render(&self, class_name: &str, package_name: &str) -> Vec<u8> {
        bind(JAVA_TEMPLATE, class_name, package_name)
    }

    fn target_extension(&self) -> &'static str {
        "java"
    }
}

/// Kotlin flavour of [`GameScreenLogicTemplate`]
#[derive(Debug, Clone, Copy, Default)]
pub struct KotlinGameScreenLogicTemplate;

impl CodeTemplate for KotlinGameScreenLogicTemplate {
    fn id(&self) -> &'static str {
        "game-screen-logic-kt"
    }

    fn render(&self, class_name: &str, package_name: &str) -> Vec<u8> {
        bind(KOTLIN_TEMPLATE, class_name, package_name)
    }

    fn target_extension(&self) -> &'static str {
        "kt"
    }
}
