//! Per-second compounding rates for annual rates of 0% to 210% in 1% steps.
//!
//! Entry `k` holds `(1 + k / 100)^(1 / SECONDS_PER_YEAR) - 1`, RAY-scaled and rounded to the
//! nearest unit, with `SECONDS_PER_YEAR = 31_536_000`.

use common_constants::RATE_TABLE_LEN;

pub const PER_SECOND_RATES: [u128; RATE_TABLE_LEN] = [
    0,
    315_522_921_573_372_069,
    627_937_192_491_029_811,
    937_303_470_807_876_291,
    1_243_680_656_318_820_313,
    1_547_125_957_863_212_449,
    1_847_694_957_439_350_563,
    2_145_441_671_308_778_766,
    2_440_418_608_258_400_032,
    2_732_676_825_177_582_096,
    3_022_265_980_097_387_651,
    3_309_234_382_829_738_809,
    3_593_629_043_335_673_582,
    3_875_495_717_943_815_212,
    4_154_878_953_532_704_766,
    4_431_822_129_783_699_001,
    4_706_367_499_604_668_376,
    4_978_556_227_818_707_071,
    5_248_428_428_206_454_012,
    5_516_023_198_985_389_894,
    5_781_378_656_804_591_713,
    6_044_531_969_328_866_956,
    6_305_519_386_481_930_552,
    6_564_376_270_414_306_731,
    6_821_137_124_257_914_909,
    7_075_835_619_725_814_916,
    7_328_504_623_612_325_154,
    7_579_176_223_245_671_879,
    7_827_881_750_942_464_046,
    8_074_651_807_510_602_799,
    8_319_516_284_844_715_117,
    8_562_504_387_655_836_125,
    8_803_644_654_374_843_397,
    9_042_964_977_267_059_506,
    9_280_492_621_793_477_152,
    9_516_254_245_252_215_863,
    9_750_275_914_732_082_987,
    9_982_583_124_408_477_109,
    10_213_200_812_210_332_586,
    10_442_153_375_885_353_362,
    10_669_464_688_489_416_887,
    10_895_158_113_324_739_488,
    11_119_256_518_350_177_949,
    11_341_782_290_085_893_806,
    11_562_757_347_033_522_600,
    11_782_203_152_631_966_085,
    12_000_140_727_767_957_525,
    12_216_590_662_859_635_112,
    12_431_573_129_530_493_155,
    12_645_107_891_890_261_873,
    12_857_214_317_438_491_660,
    13_067_911_387_605_883_891,
    13_277_217_707_947_715_319,
    13_485_151_518_003_044_533,
    13_691_730_700_832_764_692,
    13_896_972_792_248_974_856,
    14_100_894_989_747_580_714,
    14_303_514_161_155_502_801,
    14_504_846_853_003_364_538,
    14_704_909_298_634_052_284,
    14_903_717_426_057_083_482,
    15_101_286_865_558_285_608,
    15_297_632_957_073_876_762,
    15_492_770_757_337_647_113,
    15_686_715_046_809_567_945,
    15_879_480_336_393_800_741,
    16_071_080_873_953_741_500,
    16_261_530_650_631_414_501,
    16_450_843_406_978_224_030,
    16_639_032_638_903_781_447,
    16_826_111_603_449_247_523,
    17_012_093_324_391_365_594,
    17_196_990_597_683_109_019,
    17_380_815_996_736_626_005,
    17_563_581_877_553_935_635,
    17_745_300_383_710_610_089,
    17_925_983_451_197_469_287,
    18_105_642_813_125_114_803,
    18_284_290_004_295_939_570,
    18_461_936_365_648_068_049,
    18_638_593_048_575_507_814,
    18_814_271_019_128_627_483,
    18_988_981_062_098_917_230,
    19_162_733_784_991_836_347,
    19_335_539_621_891_407_188,
    19_507_408_837_220_076_030,
    19_678_351_529_397_228_464,
    19_848_377_634_399_619_850,
    20_017_496_929_226_859_581,
    20_185_719_035_274_971_386,
    20_353_053_421_620_940_224,
    20_519_509_408_221_049_400,
    20_685_096_169_025_709_030,
    20_849_822_735_013_378_766,
    21_013_697_997_146_093_524,
    21_176_730_709_249_010_668,
    21_338_929_490_816_310_513,
    21_500_302_829_745_698_933,
    21_660_859_085_003_681_152,
    21_820_606_489_223_699_322,
    21_979_553_151_239_153_028,
    22_137_707_058_553_251_421,
    22_295_076_079_747_577_922,
    22_451_667_966_831_183_462,
    22_607_490_357_531_961_737,
    22_762_550_777_531_999_946,
    22_916_856_642_648_540_774,
    23_070_415_260_962_135_956,
    23_223_233_834_893_518_430,
    23_375_319_463_230_668_822,
    23_526_679_143_107_502_699,
    23_677_319_771_935_557_588,
    23_827_248_149_290_013_116,
    23_976_470_978_751_333_716,
    24_124_994_869_703_781_042,
    24_272_826_339_092_002_558,
    24_419_971_813_136_863_571,
    24_566_437_629_011_652_227,
    24_712_230_036_479_750_648,
    24_857_355_199_494_830_361,
    25_001_819_197_764_596_426,
    25_145_628_028_279_072_135,
    25_288_787_606_804_384_844,
    25_431_303_769_342_983_232,
    25_573_182_273_561_187_174,
    25_714_428_800_184_943_324,
    25_855_048_954_364_632_360,
    25_995_048_267_009_747_743,
    26_134_432_196_094_240_590,
    26_273_206_127_933_300_927,
    26_411_375_378_432_322_088,
    26_548_945_194_308_772_349,
    26_685_920_754_287_676_010,
    26_822_307_170_271_384_951,
    26_958_109_488_484_301_325,
    27_093_332_690_593_192_287,
    27_227_981_694_803_718_638,
    27_362_061_356_933_780_828,
    27_495_576_471_464_268_007,
    27_628_531_772_567_778_590,
    27_760_931_935_115_864_216,
    27_892_781_575_665_332_905,
    28_024_085_253_424_131_678,
    28_154_847_471_197_313_901,
    28_285_072_676_313_582_081,
    28_414_765_261_532_882_807,
    28_543_929_565_935_516_899,
    28_672_569_875_793_214_728,
    28_800_690_425_422_613_911,
    28_928_295_398_021_564_269,
    29_055_388_926_488_673_037,
    29_181_975_094_226_491_750,
    29_308_057_935_928_735_076,
    29_433_641_438_351_911_032,
    29_558_729_541_071_731_548,
    29_683_326_137_224_662_197,
    29_807_435_074_234_960_081,
    29_931_060_154_527_539_322,
    30_054_205_136_226_994_408,
    30_176_873_733_843_102_670,
    30_299_069_618_943_118_520,
    30_420_796_420_811_163_676,
    30_542_057_727_095_009_449,
    30_662_857_084_440_539_277,
    30_783_197_999_114_172_030,
    30_903_083_937_613_519_206,
    31_022_518_327_266_541_896,
    31_141_504_556_819_466_457,
    31_260_045_977_013_711_030,
    31_378_145_901_152_068_468,
    31_495_807_605_654_384_875,
    31_613_034_330_602_966_748,
    31_729_829_280_277_943_722,
    31_846_195_623_682_808_076,
    31_962_136_495_060_346_507,
    32_077_654_994_399_174_179,
    32_192_754_187_931_075_710,
    32_307_437_108_619_352_598,
    32_421_706_756_638_371_528,
    32_535_566_099_844_503_151,
    32_649_018_074_238_636_131,
    32_762_065_584_420_446_688,
    32_874_711_504_034_599_359,
    32_986_958_676_209_050_351,
    33_098_809_913_985_620_624,
    33_210_268_000_743_001_740,
    33_321_335_690_612_353_509,
    33_432_015_708_885_648_574,
    33_542_310_752_416_915_312,
    33_652_223_490_016_526_737,
    33_761_756_562_838_679_545,
    33_870_912_584_762_203_936,
    33_979_694_142_764_841_501,
    34_088_103_797_291_125_161,
    34_196_144_082_613_991_941,
    34_303_817_507_190_256_283,
    34_411_126_554_010_068_537,
    34_518_073_680_940_480_368,
    34_624_661_321_063_235_914,
    34_730_891_883_006_904_770,
    34_836_767_751_273_470_155,
    34_942_291_286_559_482_960,
    35_047_464_826_071_889_838,
    35_152_290_683_838_640_963,
    35_256_771_151_014_180_660,
    35_360_908_496_179_921_747,
    35_464_704_965_639_802_103,
    35_568_162_783_711_019_730,
    35_671_284_153_010_040_391,
    35_774_071_254_733_969_770,
    35_876_526_248_937_380_012,
];
