//! Built-in water/steam tables.
//!
//! Values follow the classic engineering textbook steam tables (saturation by
//! temperature and pressure, superheated vapor, compressed liquid) on a
//! reduced set of isobars. Units: kPa, °C, m^3/kg, kJ/kg, kJ/(kg K).
//!
//! Superheated and compressed data are stored per isobar and assembled into
//! blocks by exact temperature match, so shared seam isobars are identical in
//! both neighbouring blocks.

use crate::error::{TableError, TableResult};
use crate::grid::{Axis, GridTable, PropertyColumns};
use crate::piecewise::PiecewiseTable;
use crate::saturation::{SaturationRow, SaturationTable};
use crate::store::{COMPRESSED, SUPERHEATED, TableStore};

/// `[T, v, u, h, s]`
type IsobarRow = [f64; 5];
type Isobar = (f64, &'static [IsobarRow]);
/// `(pressures, temperatures)` of one rectangular block.
type BlockLayout = (&'static [f64], &'static [f64]);

/// `[T, P, vf, vg, uf, ug, hf, hg, sf, sg]`
#[rustfmt::skip]
const SATURATION: &[[f64; 10]] = &[
    [0.01,   0.6117,  0.001000, 206.00,   0.000,  2374.9,    0.001, 2500.9, 0.0000, 9.1556],
    [5.0,    0.8725,  0.001000, 147.03,  21.019,  2381.8,   21.020, 2510.1, 0.0763, 9.0249],
    [10.0,   1.2281,  0.001000, 106.32,  42.020,  2388.7,   42.022, 2519.2, 0.1511, 8.8999],
    [20.0,   2.3392,  0.001002, 57.762,  83.913,  2402.3,   83.915, 2537.4, 0.2965, 8.6661],
    [30.0,   4.2469,  0.001004, 32.879, 125.73,   2415.9,  125.74,  2555.6, 0.4368, 8.4520],
    [40.0,   7.3851,  0.001008, 19.515, 167.53,   2429.4,  167.53,  2573.5, 0.5724, 8.2556],
    [45.81,  10.0,    0.001010, 14.670, 191.79,   2437.2,  191.81,  2583.9, 0.6492, 8.1488],
    [50.0,   12.352,  0.001012, 12.026, 209.33,   2442.7,  209.34,  2591.3, 0.7038, 8.0748],
    [60.0,   19.947,  0.001017, 7.6672, 251.16,   2455.9,  251.18,  2608.8, 0.8313, 7.9082],
    [70.0,   31.202,  0.001023, 5.0395, 292.97,   2468.9,  293.00,  2626.1, 0.9551, 7.7540],
    [80.0,   47.416,  0.001029, 3.4053, 334.82,   2481.6,  334.91,  2643.0, 1.0756, 7.6111],
    [81.32,  50.0,    0.001030, 3.2403, 340.44,   2483.2,  340.54,  2645.2, 1.0912, 7.5931],
    [90.0,   70.183,  0.001036, 2.3593, 376.75,   2493.9,  376.98,  2659.4, 1.1929, 7.4781],
    [99.61,  100.0,   0.001043, 1.6941, 417.40,   2505.6,  417.51,  2675.0, 1.3028, 7.3589],
    [100.0,  101.42,  0.001043, 1.6720, 419.06,   2506.0,  419.17,  2675.6, 1.3072, 7.3542],
    [110.0,  143.38,  0.001052, 1.2094, 461.27,   2518.0,  461.42,  2691.1, 1.4188, 7.2367],
    [120.0,  198.67,  0.001060, 0.89133, 503.60,  2529.1,  503.81,  2705.9, 1.5279, 7.1291],
    [120.21, 200.0,   0.001061, 0.88578, 504.50,  2529.1,  504.70,  2706.3, 1.5302, 7.1270],
    [133.52, 300.0,   0.001073, 0.60582, 561.11,  2543.2,  561.43,  2724.9, 1.6717, 6.9917],
    [140.0,  361.53,  0.001080, 0.50850, 588.77,  2549.6,  589.16,  2733.5, 1.7392, 6.9294],
    [143.61, 400.0,   0.001084, 0.46242, 604.22,  2553.1,  604.66,  2738.1, 1.7765, 6.8955],
    [151.83, 500.0,   0.001093, 0.37483, 639.54,  2560.7,  640.09,  2748.1, 1.8604, 6.8207],
    [158.83, 600.0,   0.001101, 0.31560, 669.72,  2566.8,  670.38,  2756.2, 1.9308, 6.7593],
    [160.0,  618.23,  0.001102, 0.30680, 674.79,  2567.8,  675.47,  2757.4, 1.9426, 6.7491],
    [170.41, 800.0,   0.001115, 0.24035, 720.87,  2576.0,  721.77,  2768.3, 2.0457, 6.6616],
    [179.88, 1000.0,  0.001127, 0.19437, 761.39,  2582.8,  762.51,  2777.1, 2.1381, 6.5850],
    [195.04, 1400.0,  0.001149, 0.14078, 828.36,  2591.8,  829.96,  2788.8, 2.2835, 6.4675],
    [200.0,  1554.9,  0.001157, 0.12721, 850.46,  2594.2,  852.26,  2792.0, 2.3305, 6.4302],
    [212.38, 2000.0,  0.001177, 0.09959, 906.12,  2599.1,  908.47,  2798.3, 2.4467, 6.3390],
    [233.85, 3000.0,  0.001217, 0.06666, 1004.6,  2603.2,  1008.3,  2803.2, 2.6454, 6.1856],
    [250.35, 4000.0,  0.001253, 0.04978, 1082.4,  2601.7,  1087.4,  2800.8, 2.7966, 6.0696],
    [263.94, 5000.0,  0.001286, 0.03945, 1148.1,  2597.0,  1154.5,  2794.2, 2.9207, 5.9737],
    [275.59, 6000.0,  0.001319, 0.03245, 1205.8,  2589.9,  1213.8,  2784.6, 3.0275, 5.8902],
    [295.01, 8000.0,  0.001385, 0.02353, 1306.0,  2570.5,  1317.1,  2758.7, 3.2077, 5.7450],
    [300.0,  8587.9,  0.001404, 0.02166, 1332.7,  2563.6,  1344.8,  2749.6, 3.2548, 5.7059],
    [311.00, 10000.0, 0.001453, 0.018028, 1393.3, 2545.2,  1407.9,  2725.5, 3.3603, 5.6159],
    [342.16, 15000.0, 0.001657, 0.010338, 1585.5, 2455.7,  1610.3,  2610.7, 3.6848, 5.3108],
    [365.75, 20000.0, 0.002040, 0.005862, 1786.4, 2295.0,  1827.2,  2412.3, 4.0156, 4.9314],
];

#[rustfmt::skip]
const SUPERHEATED_ISOBARS: &[Isobar] = &[
    (10.0, &[
        [100.0, 17.196, 2515.5, 2687.5, 8.4489],
        [150.0, 19.513, 2587.9, 2783.0, 8.6893],
        [200.0, 21.826, 2661.4, 2879.6, 8.9049],
        [250.0, 24.136, 2736.1, 2977.5, 9.1015],
        [300.0, 26.446, 2812.3, 3076.7, 9.2827],
        [400.0, 31.063, 2969.3, 3280.0, 9.6094],
        [500.0, 35.680, 3132.9, 3489.7, 9.8998],
    ]),
    (50.0, &[
        [100.0, 3.4187, 2511.5, 2682.4, 7.6953],
        [150.0, 3.8897, 2585.7, 2780.2, 7.9413],
        [200.0, 4.3562, 2660.0, 2877.8, 8.1592],
        [250.0, 4.8206, 2735.1, 2976.2, 8.3568],
        [300.0, 5.2841, 2811.6, 3075.8, 8.5387],
        [400.0, 6.2094, 2968.9, 3279.3, 8.8659],
        [500.0, 7.1338, 3132.6, 3489.3, 9.1566],
    ]),
    (100.0, &[
        [100.0, 1.6959, 2506.2, 2675.8, 7.3611],
        [150.0, 1.9367, 2582.9, 2776.6, 7.6148],
        [200.0, 2.1724, 2658.2, 2875.5, 7.8356],
        [250.0, 2.4062, 2733.9, 2974.5, 8.0346],
        [300.0, 2.6389, 2810.7, 3074.5, 8.2172],
        [400.0, 3.1027, 2968.3, 3278.6, 8.5452],
        [500.0, 3.5655, 3132.2, 3488.7, 8.8362],
    ]),
    (200.0, &[
        [150.0, 0.95986, 2577.1, 2769.1, 7.2810],
        [200.0, 1.08049, 2654.6, 2870.7, 7.5081],
        [250.0, 1.19890, 2731.4, 2971.2, 7.7100],
        [300.0, 1.31623, 2808.8, 3072.1, 7.8941],
        [400.0, 1.54934, 2967.2, 3277.0, 8.2236],
        [500.0, 1.78142, 3131.4, 3487.7, 8.5153],
    ]),
    (300.0, &[
        [150.0, 0.63402, 2571.0, 2761.2, 7.0792],
        [200.0, 0.71643, 2651.0, 2865.9, 7.3132],
        [250.0, 0.79645, 2728.9, 2967.9, 7.5180],
        [300.0, 0.87535, 2807.0, 3069.6, 7.7037],
        [400.0, 1.03155, 2966.0, 3275.5, 8.0347],
        [500.0, 1.18672, 3130.6, 3486.6, 8.3271],
    ]),
    (400.0, &[
        [150.0, 0.47088, 2564.4, 2752.8, 6.9306],
        [200.0, 0.53434, 2647.2, 2860.9, 7.1723],
        [250.0, 0.59520, 2726.4, 2964.5, 7.3804],
        [300.0, 0.65489, 2805.1, 3067.1, 7.5677],
        [400.0, 0.77265, 2964.9, 3273.9, 7.9003],
        [500.0, 0.88936, 3129.8, 3485.5, 8.1933],
    ]),
    (500.0, &[
        [200.0, 0.42503, 2643.3, 2855.8, 7.0610],
        [250.0, 0.47443, 2723.8, 2961.0, 7.2725],
        [300.0, 0.52261, 2803.3, 3064.6, 7.4614],
        [400.0, 0.61730, 2963.7, 3272.4, 7.7956],
        [500.0, 0.71094, 3129.0, 3484.5, 8.0893],
    ]),
    (600.0, &[
        [200.0, 0.35212, 2639.4, 2850.6, 6.9683],
        [250.0, 0.39390, 2721.2, 2957.6, 7.1833],
        [300.0, 0.43442, 2801.4, 3062.0, 7.3740],
        [400.0, 0.51385, 2962.5, 3270.8, 7.7097],
        [500.0, 0.59200, 3128.2, 3483.4, 8.0041],
    ]),
    (800.0, &[
        [200.0, 0.26088, 2631.1, 2839.8, 6.8177],
        [250.0, 0.29321, 2715.9, 2950.4, 7.0402],
        [300.0, 0.32416, 2797.5, 3056.9, 7.2345],
        [400.0, 0.38440, 2960.2, 3267.7, 7.5735],
        [500.0, 0.44332, 3126.6, 3481.3, 7.8692],
    ]),
    (1000.0, &[
        [200.0, 0.20602, 2622.3, 2828.3, 6.6955],
        [250.0, 0.23275, 2710.4, 2943.1, 6.9265],
        [300.0, 0.25799, 2793.7, 3051.6, 7.1246],
        [400.0, 0.30661, 2957.9, 3264.5, 7.4670],
        [500.0, 0.35411, 3125.0, 3479.1, 7.7642],
    ]),
    (1400.0, &[
        [200.0, 0.14302, 2603.9, 2804.1, 6.4975],
        [250.0, 0.16356, 2698.9, 2927.9, 6.7488],
        [300.0, 0.18233, 2785.7, 3040.9, 6.9553],
        [400.0, 0.21782, 2953.1, 3258.1, 7.3046],
        [500.0, 0.25216, 3121.8, 3474.8, 7.6047],
    ]),
    (2000.0, &[
        [250.0, 0.11150, 2680.3, 2903.3, 6.5475],
        [300.0, 0.12551, 2773.2, 3024.2, 6.7684],
        [400.0, 0.15122, 2945.9, 3248.4, 7.1292],
        [500.0, 0.17568, 3116.9, 3468.3, 7.4337],
    ]),
    (3000.0, &[
        [250.0, 0.07063, 2644.7, 2856.5, 6.2893],
        [300.0, 0.08118, 2750.8, 2994.3, 6.5412],
        [400.0, 0.09938, 2933.6, 3231.7, 6.9235],
        [500.0, 0.11619, 3108.6, 3457.2, 7.2356],
    ]),
    (4000.0, &[
        [300.0, 0.05887, 2726.2, 2961.7, 6.3639],
        [400.0, 0.07344, 2920.8, 3214.5, 6.7714],
        [500.0, 0.08646, 3100.3, 3446.0, 7.0922],
    ]),
    (5000.0, &[
        [300.0, 0.04535, 2699.0, 2925.7, 6.2110],
        [400.0, 0.05784, 2907.5, 3196.7, 6.6483],
        [500.0, 0.06858, 3091.8, 3434.7, 6.9781],
    ]),
];

const SUPERHEATED_BLOCKS: &[BlockLayout] = &[
    (
        &[10.0, 50.0, 100.0],
        &[100.0, 150.0, 200.0, 250.0, 300.0, 400.0, 500.0],
    ),
    (
        &[100.0, 200.0, 300.0, 400.0],
        &[150.0, 200.0, 250.0, 300.0, 400.0, 500.0],
    ),
    (
        &[400.0, 500.0, 600.0, 800.0, 1000.0, 1400.0],
        &[200.0, 250.0, 300.0, 400.0, 500.0],
    ),
    (&[1400.0, 2000.0, 3000.0], &[250.0, 300.0, 400.0, 500.0]),
    (&[3000.0, 4000.0, 5000.0], &[300.0, 400.0, 500.0]),
];

#[rustfmt::skip]
const COMPRESSED_ISOBARS: &[Isobar] = &[
    (5000.0, &[
        [0.0,   0.0009977, 0.04,   5.03,   0.0001],
        [20.0,  0.0009996, 83.61,  88.61,  0.2954],
        [40.0,  0.0010057, 166.92, 171.95, 0.5705],
        [60.0,  0.0010149, 250.29, 255.36, 0.8287],
        [80.0,  0.0010267, 333.82, 338.96, 1.0723],
        [100.0, 0.0010410, 417.65, 422.85, 1.3034],
        [120.0, 0.0010576, 501.91, 507.19, 1.5236],
        [140.0, 0.0010769, 586.80, 592.18, 1.7344],
        [160.0, 0.0010988, 672.55, 678.04, 1.9374],
        [180.0, 0.0011240, 759.47, 765.09, 2.1338],
        [200.0, 0.0011531, 847.92, 853.68, 2.3251],
        [220.0, 0.0011868, 938.39, 944.32, 2.5127],
        [240.0, 0.0012268, 1031.6, 1037.7, 2.6983],
        [260.0, 0.0012755, 1128.5, 1134.9, 2.8841],
    ]),
    (10000.0, &[
        [0.0,   0.0009952, 0.12,   10.07,  0.0003],
        [20.0,  0.0009973, 83.31,  93.28,  0.2943],
        [40.0,  0.0010035, 166.33, 176.37, 0.5685],
        [60.0,  0.0010127, 249.43, 259.55, 0.8260],
        [80.0,  0.0010244, 332.69, 342.94, 1.0691],
        [100.0, 0.0010385, 416.23, 426.62, 1.2996],
        [120.0, 0.0010549, 500.18, 510.73, 1.5191],
        [140.0, 0.0010738, 584.72, 595.45, 1.7293],
        [160.0, 0.0010954, 670.06, 681.01, 1.9316],
        [180.0, 0.0011200, 756.48, 767.68, 2.1271],
        [200.0, 0.0011482, 844.32, 855.80, 2.3174],
        [220.0, 0.0011809, 934.01, 945.82, 2.5037],
        [240.0, 0.0012192, 1026.2, 1038.3, 2.6876],
        [260.0, 0.0012653, 1121.6, 1134.3, 2.8710],
        [280.0, 0.0013226, 1221.8, 1235.0, 3.0565],
        [300.0, 0.0013980, 1329.4, 1343.3, 3.2488],
    ]),
    (15000.0, &[
        [0.0,   0.0009928, 0.18,   15.07,  0.0004],
        [20.0,  0.0009951, 83.01,  97.93,  0.2932],
        [40.0,  0.0010013, 165.75, 180.77, 0.5666],
        [60.0,  0.0010105, 248.58, 263.74, 0.8234],
        [80.0,  0.0010221, 331.59, 346.92, 1.0659],
        [100.0, 0.0010361, 414.85, 430.39, 1.2958],
        [120.0, 0.0010522, 498.50, 514.28, 1.5148],
        [140.0, 0.0010708, 582.69, 598.75, 1.7243],
        [160.0, 0.0010920, 667.63, 684.01, 1.9259],
        [180.0, 0.0011160, 753.58, 770.32, 2.1206],
        [200.0, 0.0011435, 840.84, 858.00, 2.3100],
        [220.0, 0.0011752, 929.81, 947.43, 2.4951],
        [240.0, 0.0012121, 1021.0, 1039.2, 2.6774],
        [260.0, 0.0012560, 1115.1, 1134.0, 2.8586],
        [280.0, 0.0013096, 1213.4, 1233.0, 3.0410],
        [300.0, 0.0013783, 1317.6, 1338.3, 3.2279],
        [320.0, 0.0014733, 1431.9, 1454.0, 3.4263],
        [340.0, 0.0016311, 1567.9, 1592.4, 3.6555],
    ]),
    (20000.0, &[
        [0.0,   0.0009904, 0.23,   20.03,  0.0005],
        [20.0,  0.0009929, 82.71,  102.57, 0.2921],
        [40.0,  0.0009992, 165.17, 185.16, 0.5646],
        [60.0,  0.0010084, 247.75, 267.92, 0.8208],
        [80.0,  0.0010199, 330.50, 350.90, 1.0627],
        [100.0, 0.0010337, 413.50, 434.17, 1.2920],
        [120.0, 0.0010496, 496.85, 517.84, 1.5105],
        [140.0, 0.0010679, 580.71, 602.07, 1.7194],
        [160.0, 0.0010886, 665.25, 687.03, 1.9203],
        [180.0, 0.0011122, 750.78, 773.02, 2.1143],
        [200.0, 0.0011390, 837.49, 860.27, 2.3027],
        [220.0, 0.0011697, 925.77, 949.16, 2.4867],
        [240.0, 0.0012053, 1016.1, 1040.2, 2.6676],
        [260.0, 0.0012472, 1109.0, 1134.0, 2.8469],
        [280.0, 0.0012978, 1205.5, 1231.5, 3.0265],
        [300.0, 0.0013611, 1307.1, 1334.4, 3.2091],
        [320.0, 0.0014450, 1416.6, 1445.5, 3.3996],
        [340.0, 0.0015693, 1540.2, 1571.6, 3.6086],
    ]),
];

const COMPRESSED_BLOCKS: &[BlockLayout] = &[
    (
        &[5000.0, 10000.0],
        &[
            0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0, 140.0, 160.0, 180.0, 200.0, 220.0, 240.0,
            260.0,
        ],
    ),
    (
        &[10000.0, 15000.0],
        &[
            0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0, 140.0, 160.0, 180.0, 200.0, 220.0, 240.0,
            260.0, 280.0, 300.0,
        ],
    ),
    (
        &[15000.0, 20000.0],
        &[
            0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0, 140.0, 160.0, 180.0, 200.0, 220.0, 240.0,
            260.0, 280.0, 300.0, 320.0, 340.0,
        ],
    ),
];

/// The built-in table store.
pub fn steam_tables() -> TableResult<TableStore> {
    let saturation = SaturationTable::new(saturation_rows())?;
    let superheated = assemble(SUPERHEATED, SUPERHEATED_ISOBARS, SUPERHEATED_BLOCKS)?;
    let compressed = assemble(COMPRESSED, COMPRESSED_ISOBARS, COMPRESSED_BLOCKS)?;
    Ok(TableStore::new(saturation, superheated, compressed).with_source("built-in"))
}

fn saturation_rows() -> Vec<SaturationRow> {
    SATURATION
        .iter()
        .map(|r| SaturationRow {
            temperature: r[0],
            pressure: r[1],
            liquid: PropertyColumns::new(r[2], r[4], r[6], r[8]),
            vapor: PropertyColumns::new(r[3], r[5], r[7], r[9]),
        })
        .collect()
}

fn assemble(
    name: &str,
    isobars: &[Isobar],
    layouts: &[BlockLayout],
) -> TableResult<PiecewiseTable> {
    let blocks = layouts
        .iter()
        .map(|(pressures, temperatures)| {
            let nodes = pressures
                .iter()
                .map(|p| isobar_nodes(name, isobars, *p, temperatures))
                .collect::<TableResult<Vec<_>>>()?;
            GridTable::new(
                Axis::new("pressure", pressures.to_vec())?,
                Axis::new("temperature", temperatures.to_vec())?,
                nodes,
            )
        })
        .collect::<TableResult<Vec<_>>>()?;
    PiecewiseTable::new(name, blocks)
}

fn isobar_nodes(
    name: &str,
    isobars: &[Isobar],
    p: f64,
    temperatures: &[f64],
) -> TableResult<Vec<PropertyColumns>> {
    let (_, rows) = isobars
        .iter()
        .find(|(pressure, _)| *pressure == p)
        .ok_or_else(|| TableError::malformed(format!("{name}: no isobar at {p} kPa")))?;
    temperatures
        .iter()
        .map(|t| {
            rows.iter()
                .find(|row| row[0] == *t)
                .map(|row| PropertyColumns::new(row[1], row[2], row[3], row[4]))
                .ok_or_else(|| {
                    TableError::malformed(format!("{name}: isobar {p} kPa has no entry at {t} °C"))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Column;

    #[test]
    fn builds_and_validates() {
        let store = steam_tables().unwrap();
        assert_eq!(store.saturation().len(), SATURATION.len());
        assert_eq!(store.superheated().blocks().len(), SUPERHEATED_BLOCKS.len());
        assert_eq!(store.compressed().blocks().len(), COMPRESSED_BLOCKS.len());
        assert_eq!(store.source(), Some("built-in"));
    }

    #[test]
    fn every_stored_superheated_node_is_reproduced() {
        let store = steam_tables().unwrap();
        for (p, rows) in SUPERHEATED_ISOBARS {
            for row in rows.iter() {
                let got = store.superheated().interpolate(*p, row[0]).unwrap();
                assert_eq!(
                    got,
                    PropertyColumns::new(row[1], row[2], row[3], row[4]),
                    "P={p} T={}",
                    row[0]
                );
            }
        }
    }

    #[test]
    fn every_stored_compressed_node_is_reproduced() {
        let store = steam_tables().unwrap();
        for (p, rows) in COMPRESSED_ISOBARS {
            for row in rows.iter() {
                let got = store.compressed().interpolate(*p, row[0]).unwrap();
                assert_eq!(got.enthalpy, row[3], "P={p} T={}", row[0]);
            }
        }
    }

    #[test]
    fn saturation_rows_are_exact() {
        let store = steam_tables().unwrap();
        let sat = store.saturation();
        for r in SATURATION {
            assert_eq!(sat.tsat(r[1]).unwrap(), r[0]);
            assert_eq!(sat.psat(r[0]).unwrap(), r[1]);
            let s = sat.at_pressure(r[1]).unwrap();
            assert_eq!(s.vapor.get(Column::Enthalpy), r[7]);
        }
    }

    #[test]
    fn textbook_node_at_one_megapascal() {
        let store = steam_tables().unwrap();
        let node = store.superheated().interpolate(1000.0, 400.0).unwrap();
        assert_eq!(node.specific_volume, 0.30661);
        assert_eq!(node.internal_energy, 2957.9);
        assert_eq!(node.enthalpy, 3264.5);
        assert_eq!(node.entropy, 7.4670);
    }
}
