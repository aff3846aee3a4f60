fn main() -> anyhow::Result<()> {
    moodmate_lib::run()
}
