fn main() {
    graphparser::cli::run();
}
