#[macroquad::main("Cardforge")]
async fn main() {
    cardforge_web_lib::run().await;
}
