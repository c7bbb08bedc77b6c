fn main() {
    // Re-emits the cached ESP-IDF environment for dependent build steps.
    // On host targets (no IDF checkout) this emits nothing.
    embuild::espidf::sysenv::output();
}
