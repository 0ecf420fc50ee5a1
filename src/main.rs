fn main() {
    dsput::app::cli::run();
}
