fn main() -> Result<(), Box<dyn std::error::Error>> {
    khet_chat::cli::main()
}
