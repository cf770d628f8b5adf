fn main() {
    bevy_volley::game::run();
}
