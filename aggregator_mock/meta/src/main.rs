fn main() {
    multiversx_sc_meta_lib::cli_main::<aggregator_mock::AbiProvider>();
}
